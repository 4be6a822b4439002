//! Reconciliation, scoring and ranking for fundscore.
//!
//! - [`Reconciler`] merges provider results into one
//!   [`MetricRecord`](fundscore_traits::MetricRecord) per ticker, highest
//!   priority source first.
//! - [`ScoringEngine`] turns a record into a 0–100 score.
//! - [`RankingPipeline`] runs both over a batch and keeps the top results.
//!
//! # Examples
//!
//! ```rust,no_run
//! use fundscore_rank::{RankingPipeline, Reconciler, ScoringEngine};
//! use fundscore_traits::MetricConfig;
//!
//! # async fn run() {
//! let pipeline = RankingPipeline::new(
//!     Reconciler::new(Vec::new()),
//!     ScoringEngine::new(MetricConfig::default()),
//! );
//! let top = pipeline.rank(&["TCS.NS", "INFY.NS"], 10).await;
//! # }
//! ```

mod pipeline;
mod reconcile;
mod scoring;

#[cfg(test)]
mod testing;

pub use pipeline::RankingPipeline;
pub use reconcile::{Reconciler, Reconciliation, SourceOutcome, cleanup};
pub use scoring::ScoringEngine;
