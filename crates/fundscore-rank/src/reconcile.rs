//! Multi-source metric reconciliation.

use fundscore_traits::{Metric, MetricProvider, MetricRecord, Ticker};

/// What one provider contributed to a reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceOutcome {
    /// Provider name.
    pub name: String,
    /// Number of previously absent fields this provider filled.
    pub filled: usize,
    /// Whether the provider call failed outright.
    pub failed: bool,
}

/// The reconciled record for a ticker plus a per-source account of how it
/// was assembled.
#[derive(Debug, Clone, PartialEq)]
pub struct Reconciliation {
    /// Ticker the record belongs to.
    pub ticker: Ticker,
    /// The final record, after cleanup.
    pub record: MetricRecord,
    /// One entry per provider consulted, in priority order.
    pub sources: Vec<SourceOutcome>,
}

impl Reconciliation {
    /// Whether any source supplied at least one value.
    ///
    /// Cleanup defaults do not count: a record made only of defaults is
    /// treated as empty.
    #[must_use]
    pub fn has_source_data(&self) -> bool {
        self.sources.iter().any(|s| s.filled > 0)
    }
}

/// Merges provider results in priority order: the first source to supply a
/// metric wins, later sources only fill gaps.
#[derive(Debug)]
pub struct Reconciler {
    providers: Vec<Box<dyn MetricProvider>>,
}

impl Reconciler {
    /// Create a reconciler over providers listed highest priority first.
    #[must_use]
    pub const fn new(providers: Vec<Box<dyn MetricProvider>>) -> Self {
        Self { providers }
    }

    /// Provider names in priority order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.providers.iter().map(|p| p.name())
    }

    /// Build the record for one ticker.
    ///
    /// Providers are called one at a time. A failing provider contributes
    /// nothing; iteration stops early once every metric is present.
    pub async fn reconcile(&self, ticker: &str) -> Reconciliation {
        let mut record = MetricRecord::empty();
        let mut sources = Vec::with_capacity(self.providers.len());

        for provider in &self.providers {
            let name = provider.name();
            match provider.fetch(ticker).await {
                Ok(partial) => {
                    let filled = record.merge_partial(&partial);
                    tracing::debug!(ticker, source = name, filled, "source merged");
                    sources.push(SourceOutcome {
                        name: name.to_string(),
                        filled,
                        failed: false,
                    });
                }
                Err(e) => {
                    tracing::warn!(ticker, source = name, error = %e, "source failed");
                    sources.push(SourceOutcome {
                        name: name.to_string(),
                        filled: 0,
                        failed: true,
                    });
                }
            }

            if record.is_complete() {
                break;
            }
        }

        cleanup(&mut record);
        tracing::info!(
            ticker,
            present = record.present_count(),
            sources = sources.len(),
            "metrics reconciled"
        );

        Reconciliation {
            ticker: ticker.to_string(),
            record,
            sources,
        }
    }
}

/// Apply the post-merge defaults.
///
/// Missing ROE and net profit margin become 0 (no evidence of
/// profitability). Free cash flow that is missing or not a usable number
/// becomes 0. Every other metric is left as is.
pub fn cleanup(record: &mut MetricRecord) {
    for metric in [Metric::Roe, Metric::NetProfitMargin, Metric::FreeCashFlow] {
        if !record.get(metric).is_some_and(f64::is_finite) {
            record.set(metric, Some(0.0));
        }
    }
}
