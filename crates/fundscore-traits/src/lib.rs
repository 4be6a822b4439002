#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundscore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the fundscore fundamental scoring engine.
//!
//! This crate provides the shared vocabulary of the workspace: the six
//! scored metrics, the reconciled [`MetricRecord`], the validated
//! [`MetricConfig`], runtime [`Settings`] and the [`MetricProvider`]
//! capability implemented by every data source.

/// The version of the fundscore-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod provider;
pub mod types;

// Re-exports
pub use config::{Direction, MetricConfig, MetricSpec, Settings, SourceId};
pub use error::{FundscoreError, Result};
pub use provider::MetricProvider;
pub use types::{Metric, MetricRecord, PartialMetrics, ScoredResult, Ticker, merge, round_to};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(VERSION.contains('.'));
    }
}
