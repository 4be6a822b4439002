//! Direct-API metric provider.

use async_trait::async_trait;
use fundscore_traits::{Metric, MetricProvider, PartialMetrics};

use crate::{
    FmpClient,
    error::FmpError,
    types::{FinancialRatios, KeyMetrics, Period},
};

/// Reads ready-made ratios from the FMP `ratios` and `key-metrics`
/// endpoints.
///
/// Produces net profit margin, current ratio, debt-to-equity, interest
/// coverage and ROE. Free cash flow is left to the statement provider.
#[derive(Debug, Clone)]
pub struct FmpRatiosProvider {
    client: FmpClient,
}

impl FmpRatiosProvider {
    /// Create a provider backed by the given client.
    #[must_use]
    pub const fn new(client: FmpClient) -> Self {
        Self { client }
    }
}

/// Map the latest ratio and key-metric records onto canonical metrics.
///
/// ROE comes from the ratios record when it carries one, otherwise from
/// key metrics; current ratio likewise falls back to key metrics.
#[must_use]
pub fn ratio_metrics(
    ratios: Option<&FinancialRatios>,
    key_metrics: Option<&KeyMetrics>,
) -> PartialMetrics {
    let mut metrics = PartialMetrics::new();

    if let Some(r) = ratios {
        metrics.insert_opt(Metric::Roe, r.return_on_equity);
        metrics.insert_opt(Metric::DebtToEquity, r.debt_equity_ratio);
        metrics.insert_opt(Metric::NetProfitMargin, r.net_profit_margin);
        metrics.insert_opt(Metric::CurrentRatio, r.current_ratio);
        metrics.insert_opt(Metric::InterestCoverage, r.interest_coverage);
    }

    if let Some(k) = key_metrics {
        if metrics.get(Metric::Roe).is_none() {
            metrics.insert_opt(Metric::Roe, k.roe);
        }
        if metrics.get(Metric::CurrentRatio).is_none() {
            metrics.insert_opt(Metric::CurrentRatio, k.current_ratio);
        }
    }

    metrics
}

#[async_trait]
impl MetricProvider for FmpRatiosProvider {
    fn name(&self) -> &str {
        "fmp_ratios"
    }

    async fn fetch(&self, ticker: &str) -> fundscore_traits::Result<PartialMetrics> {
        let ratios = self.client.ratios(ticker, Period::Annual, Some(1)).await;
        let key_metrics = self
            .client
            .key_metrics(ticker, Period::Annual, Some(1))
            .await;

        let (ratios, key_metrics) = match (ratios, key_metrics) {
            (Err(e), Err(_)) => return Err(e.into()),
            (Ok(r), Err(e)) => {
                tracing::warn!(ticker, error = %e, "fmp key-metrics unavailable");
                (r, Vec::new())
            }
            (Err(e), Ok(k)) => {
                tracing::warn!(ticker, error = %e, "fmp ratios unavailable");
                (Vec::new(), k)
            }
            (Ok(r), Ok(k)) => (r, k),
        };

        if ratios.is_empty() && key_metrics.is_empty() {
            return Err(FmpError::NoData(ticker.to_string()).into());
        }

        let metrics = ratio_metrics(ratios.first(), key_metrics.first());
        tracing::debug!(ticker, count = metrics.len(), "fmp ratios retrieved");
        Ok(metrics)
    }
}
