//! Error types for the analysis pipeline.

use thiserror::Error;

/// Errors that abort an analysis run.
///
/// Per-event conditions (missing collection, Q² outside the window, undefined
/// derived values) are not errors; they are reported through
/// [`EventOutcome`](crate::EventOutcome) and [`RunSummary`](crate::RunSummary).
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Event model or source error.
    #[error(transparent)]
    Core(#[from] nec_core::Error),

    /// Histogram declaration, fill or merge error.
    #[error(transparent)]
    Hist(#[from] nec_hist::HistError),

    /// Invalid run options.
    #[error("invalid options: {0}")]
    Validation(String),

    /// Worker pool could not be set up.
    #[error("thread pool error: {0}")]
    ThreadPool(String),
}

/// Result alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
