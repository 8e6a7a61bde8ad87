//! Error types for histogram declaration, filling and persistence.

use thiserror::Error;

/// Errors raised by histograms and the registry.
#[derive(Error, Debug)]
pub enum HistError {
    /// I/O error writing or reading an artifact.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Axis definition is unusable (zero bins, non-finite or inverted edges).
    #[error("invalid axis '{title}': {reason}")]
    InvalidAxis {
        /// Axis title.
        title: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Name referenced but never declared.
    #[error("unknown histogram: {0}")]
    UnknownHistogram(String),

    /// Name declared twice.
    #[error("duplicate histogram: {0}")]
    DuplicateHistogram(String),

    /// 1D fill on a 2D histogram or vice versa.
    #[error("dimension mismatch for '{name}': histogram is {actual}D, fill is {requested}D")]
    DimensionMismatch {
        /// Histogram name.
        name: String,
        /// Dimension of the histogram.
        actual: usize,
        /// Dimension of the fill call.
        requested: usize,
    },

    /// Merge between histograms with different names or binning.
    #[error("binning mismatch: {0}")]
    BinningMismatch(String),
}

/// Result alias for histogram operations.
pub type Result<T> = std::result::Result<T, HistError>;
