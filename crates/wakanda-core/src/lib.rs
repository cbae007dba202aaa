//! Wakanda Core - Domain types, traits, and shared configuration
//!
//! This crate defines the abstractions shared by the Wakanda AI crates:
//! - The character/question query model
//! - The answer chain trait that the HTTP layer forwards to
//! - The LLM client trait used by chain implementations
//! - Common error types
//! - Configuration management

pub mod config;

pub use config::{
    AppConfig, ChainConfig, ConfigError, LlmConfig, LlmProvider, LoggingConfig, ServerConfig,
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ============================================================================
// Error Types
// ============================================================================

/// Core error types for Wakanda operations
#[derive(Error, Debug)]
pub enum WakandaError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<ConfigError> for WakandaError {
    fn from(err: ConfigError) -> Self {
        WakandaError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, WakandaError>;

// ============================================================================
// Query Model
// ============================================================================

/// A question addressed to a character.
///
/// Both fields are guaranteed to be non-empty: the only way to build one is
/// through [`CharacterQuery::new`] or [`CharacterQuery::from_parts`].
/// Values are kept exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterQuery {
    character: String,
    question: String,
}

impl CharacterQuery {
    /// Build a query, rejecting empty fields
    pub fn new(character: impl Into<String>, question: impl Into<String>) -> Result<Self> {
        Self::from_parts(Some(character.into()), Some(question.into()))
    }

    /// Build a query from optional request fields
    ///
    /// Absent and empty values are treated as missing; anything else passes
    /// through unchanged.
    pub fn from_parts(character: Option<String>, question: Option<String>) -> Result<Self> {
        match (present(character), present(question)) {
            (Some(character), Some(question)) => Ok(Self {
                character,
                question,
            }),
            (None, _) => Err(WakandaError::Validation("character is required".to_string())),
            (_, None) => Err(WakandaError::Validation("question is required".to_string())),
        }
    }

    pub fn character(&self) -> &str {
        &self.character
    }

    pub fn question(&self) -> &str {
        &self.question
    }
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Answer produced by the bundled documents chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainAnswer {
    /// Character the answer is voiced as
    pub character: String,
    /// Generated answer text
    pub answer: String,
}

// ============================================================================
// Traits
// ============================================================================

/// Question answering chain that the HTTP layer forwards requests to.
///
/// Answers are opaque JSON values; callers pass them through unchanged.
#[async_trait]
pub trait AnswerChain: Send + Sync {
    /// Answer a question in the voice of a character
    async fn run(&self, character: &str, question: &str) -> Result<serde_json::Value>;

    /// Alternate entry point used by the JSON body route
    async fn get_wakanda_ai_response(
        &self,
        character: &str,
        question: &str,
    ) -> Result<serde_json::Value> {
        self.run(character, question).await
    }
}

/// LLM client trait
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Generate a completion for a user prompt under a system instruction
    async fn generate(&self, system: &str, prompt: &str) -> Result<String>;
}

// ============================================================================
// Tests
// ============================================================================
