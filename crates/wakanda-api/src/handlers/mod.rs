//! API handlers

pub mod ask;
pub mod health;
