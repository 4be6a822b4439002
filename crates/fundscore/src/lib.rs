#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fundscore/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # fundscore
//!
//! Multi-source fundamental scoring and ranking of listed equities.
//!
//! fundscore is an umbrella crate that re-exports all fundscore sub-crates
//! for convenience.
//!
//! ## Quick Start
//!
//! ```ignore
//! use std::time::Duration;
//! use fundscore::prelude::*;
//! use fundscore::fmp::{FmpClient, FmpRatiosProvider};
//! use fundscore::screener::ScreenerProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let providers: Vec<Box<dyn MetricProvider>> = vec![
//!     Box::new(FmpRatiosProvider::new(FmpClient::from_env()?)),
//!     Box::new(ScreenerProvider::new(
//!         "https://www.screener.in",
//!         "Mozilla/5.0",
//!         ".NS",
//!         Duration::from_secs(3),
//!     )?),
//! ];
//!
//! let pipeline = RankingPipeline::new(
//!     Reconciler::new(providers),
//!     ScoringEngine::new(MetricConfig::default()),
//! );
//! for result in pipeline.rank(&["TCS.NS", "INFY.NS"], 10).await {
//!     println!("{} {:.2}", result.ticker, result.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Core types, configuration and the [`MetricProvider`] trait
//! - [`fmp`] - Financial Modeling Prep client and its two providers
//! - [`screener`] - Scraped-page provider
//! - [`rank`] - Reconciliation, scoring and ranking
//! - [`report`] - Console rendering and CSV export
//!
//! ## Architecture
//!
//! 1. **Providers** each produce a partial set of the six metrics
//! 2. The **reconciler** merges them, highest priority first
//! 3. The **scoring engine** maps each record to a 0–100 score
//! 4. The **pipeline** ranks a batch and keeps the top results

/// Version information for the fundscore crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types, configuration and the provider trait.
pub mod traits {
    pub use fundscore_traits::*;
}

pub use fundscore_traits::{
    Direction, FundscoreError, Metric, MetricConfig, MetricProvider, MetricRecord, MetricSpec,
    PartialMetrics, Result, ScoredResult, Settings, SourceId,
};

// ============================================================================
// Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client and providers.
///
/// Set `FMP_API_KEY` in the environment or a `.env` file; get a key at
/// <https://financialmodelingprep.com/>.
pub mod fmp {
    pub use fundscore_fmp::*;
}

/// Scraped-page provider for screener.in.
pub mod screener {
    pub use fundscore_screener::*;
}

// ============================================================================
// Ranking
// ============================================================================

/// Reconciliation, scoring and ranking.
pub mod rank {
    pub use fundscore_rank::*;
}

pub use fundscore_rank::{RankingPipeline, Reconciler, ScoringEngine};

// ============================================================================
// Reporting
// ============================================================================

/// Console rendering and CSV export of results.
pub mod report {
    pub use fundscore_report::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use fundscore::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        FundscoreError, Metric, MetricConfig, MetricProvider, MetricRecord, PartialMetrics,
        RankingPipeline, Reconciler, Result, ScoredResult, ScoringEngine, Settings,
    };
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_provider(_provider: &dyn MetricProvider) {}

        let _result: Result<()> = Ok(());
        let _error = FundscoreError::InvalidConfig("test".to_string());
    }

    #[tokio::test]
    async fn test_pipeline_without_providers() {
        let pipeline = RankingPipeline::new(
            Reconciler::new(Vec::new()),
            ScoringEngine::new(MetricConfig::default()),
        );
        assert!(pipeline.rank(&["TCS.NS"], 10).await.is_empty());
    }
}
