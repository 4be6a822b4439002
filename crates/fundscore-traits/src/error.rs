//! Error types for the fundscore framework.
//!
//! This module defines the error type shared by every fundscore crate.
//! Provider crates keep their own transport-level errors and convert them
//! into [`FundscoreError::DataFetch`] at the provider boundary.

use thiserror::Error;

/// The main error type for fundscore operations.
#[derive(Debug, Error)]
pub enum FundscoreError {
    /// Metric configuration failed validation.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A metric record did not carry exactly the six known metrics.
    #[error("Invalid metric record: {0}")]
    InvalidRecord(String),

    /// A metric source could not deliver data.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// A value could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for fundscore operations.
pub type Result<T> = std::result::Result<T, FundscoreError>;
