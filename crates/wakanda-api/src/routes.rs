//! API route definitions
//!
//! Mounted under `/api` by the top-level router.

use crate::handlers::ask;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Character question routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/wakanda", post(ask::ask_handler))
        .route("/wakanda-ai", get(ask::ask_query_handler))
}
