//! Error hierarchy for tidyclaw.

use thiserror::Error;

/// Top-level error type for all tidyclaw operations.
#[derive(Debug, Error)]
pub enum TidyError {
    #[error("Target not found: {path}")]
    NotFound { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
