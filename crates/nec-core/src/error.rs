//! Error types for NEC analysis

use thiserror::Error;

/// NEC core error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Input or output cannot be opened, or the input holds no events.
    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    /// A required named collection is absent or empty.
    #[error("Missing collection: {0}")]
    MissingCollection(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
