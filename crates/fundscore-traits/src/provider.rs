//! Metric provider trait.
//!
//! A provider is one source of fundamental metrics. Each provider maps its
//! own field names onto the canonical [`Metric`](crate::Metric) set and may
//! produce any subset of it.

use async_trait::async_trait;
use std::fmt::Debug;

use crate::{PartialMetrics, Result};

/// A source of fundamental metrics for a single ticker.
///
/// Implementations must be thread-safe (`Send + Sync`) so a provider list
/// can be shared by the HTTP server.
///
/// # Errors and partial data
///
/// A failure of the whole call (network error, unparseable response) is
/// returned as `Err`; callers treat it as an empty result and move on to
/// the next source. A failure to extract one field simply leaves that
/// metric out of the returned [`PartialMetrics`].
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use fundscore_traits::{Metric, MetricProvider, PartialMetrics, Result};
///
/// #[derive(Debug)]
/// struct Fixed;
///
/// #[async_trait]
/// impl MetricProvider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch(&self, _ticker: &str) -> Result<PartialMetrics> {
///         Ok(PartialMetrics::new().with(Metric::Roe, 0.18))
///     }
/// }
/// ```
#[async_trait]
pub trait MetricProvider: Debug + Send + Sync {
    /// Short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Fetch whatever metrics this source has for `ticker`.
    ///
    /// `ticker` is exchange-qualified (e.g. `"TCS.NS"`); providers that key
    /// on the bare symbol strip the suffix themselves.
    async fn fetch(&self, ticker: &str) -> Result<PartialMetrics>;
}
