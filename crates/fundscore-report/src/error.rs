//! Error types for result presentation and export.

use thiserror::Error;

/// Errors raised while writing result tables.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Nothing to export.
    #[error("no results to export")]
    EmptyResults,

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Table construction or CSV writing failed.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Result type for report operations.
pub type Result<T> = std::result::Result<T, ReportError>;
