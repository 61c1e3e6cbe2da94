//! Error types for the reflection engine.
//!
//! The analysis path itself never fails; these errors only surface from configuration
//! loading and from external candidate sources, and the service degrades them to
//! "no candidates".

use thiserror::Error;

/// Result type alias for fallible engine operations.
pub type ReflectionResult<T> = Result<T, ReflectionError>;

#[derive(Error, Debug)]
pub enum ReflectionError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Candidate source error: {0}")]
    Candidate(String),

    #[error("Candidate source timed out after {0}ms")]
    Timeout(u64),
}

impl From<config::ConfigError> for ReflectionError {
    fn from(err: config::ConfigError) -> Self {
        ReflectionError::Config(err.to_string())
    }
}
