//! Reconcile, score and rank a batch of tickers.

use fundscore_traits::ScoredResult;

use crate::{reconcile::Reconciler, scoring::ScoringEngine};

/// Runs every ticker through reconciliation and scoring, then keeps the
/// best-scoring ones.
#[derive(Debug)]
pub struct RankingPipeline {
    reconciler: Reconciler,
    engine: ScoringEngine,
}

impl RankingPipeline {
    /// Create a pipeline.
    #[must_use]
    pub const fn new(reconciler: Reconciler, engine: ScoringEngine) -> Self {
        Self { reconciler, engine }
    }

    /// The reconciler feeding this pipeline.
    #[must_use]
    pub const fn reconciler(&self) -> &Reconciler {
        &self.reconciler
    }

    /// The scoring engine used by this pipeline.
    #[must_use]
    pub const fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Reconcile and score one ticker.
    ///
    /// Returns `None` when no source supplied any data for it.
    pub async fn evaluate(&self, ticker: &str) -> Option<ScoredResult> {
        let reconciliation = self.reconciler.reconcile(ticker).await;
        if !reconciliation.has_source_data() {
            tracing::warn!(ticker, "no data from any source, excluded");
            return None;
        }

        let score = self.engine.score(&reconciliation.record);
        tracing::info!(ticker, score, "scored");
        Some(ScoredResult::new(reconciliation.ticker, score, reconciliation.record))
    }

    /// Rank `tickers` by score, best first, keeping at most `top_n`.
    ///
    /// Tickers are processed one at a time in the given order. Equal scores
    /// keep that order. Tickers without any source data are left out.
    pub async fn rank<S: AsRef<str>>(&self, tickers: &[S], top_n: usize) -> Vec<ScoredResult> {
        let mut results = Vec::with_capacity(tickers.len());
        for ticker in tickers {
            if let Some(result) = self.evaluate(ticker.as_ref()).await {
                results.push(result);
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(top_n);

        tracing::info!(
            requested = tickers.len(),
            returned = results.len(),
            top_n,
            "ranking complete"
        );
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingProvider, StaticProvider};
    use approx::assert_relative_eq;
    use fundscore_traits::{
        Direction, Metric, MetricConfig, MetricProvider, MetricSpec, PartialMetrics,
    };
    use std::collections::BTreeMap;

    /// Only ROE counts, threshold 0.1.
    fn roe_only() -> ScoringEngine {
        let specs: BTreeMap<Metric, MetricSpec> = Metric::ALL
            .into_iter()
            .map(|m| {
                let weight = if m == Metric::Roe { 1.0 } else { 0.0 };
                (m, MetricSpec::new(weight, 0.1, Direction::Higher))
            })
            .collect();
        ScoringEngine::new(MetricConfig::new(specs).unwrap())
    }

    fn roe(value: f64) -> PartialMetrics {
        PartialMetrics::new().with(Metric::Roe, value)
    }

    fn pipeline(providers: Vec<Box<dyn MetricProvider>>) -> RankingPipeline {
        RankingPipeline::new(Reconciler::new(providers), roe_only())
    }

    #[test]
    fn test_accessors() {
        let p = pipeline(vec![Box::new(StaticProvider::new("a")), Box::new(FailingProvider)]);
        assert_eq!(p.reconciler().provider_names().collect::<Vec<_>>(), vec!["a", "failing"]);
        assert_relative_eq!(p.engine().config().spec(Metric::Roe).weight, 1.0);
        assert_relative_eq!(p.engine().config().spec(Metric::FreeCashFlow).weight, 0.0);
    }

    #[tokio::test]
    async fn test_best_score_first() {
        let source = StaticProvider::new("a")
            .with("B.NS", roe(0.12))
            .with("A.NS", roe(0.16));
        let p = pipeline(vec![Box::new(source)]);

        let all = p.rank(&["B.NS", "A.NS"], 10).await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].ticker, "A.NS");
        assert_relative_eq!(all[0].score, 80.0, epsilon = 1e-9);
        assert_relative_eq!(all[1].score, 60.0, epsilon = 1e-9);

        let top = p.rank(&["B.NS", "A.NS"], 1).await;
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].ticker, "A.NS");
    }

    #[tokio::test]
    async fn test_ties_keep_input_order() {
        let source = StaticProvider::new("a")
            .with("X.NS", roe(0.15))
            .with("Y.NS", roe(0.15))
            .with("Z.NS", roe(0.15));
        let p = pipeline(vec![Box::new(source)]);

        let tickers: Vec<String> = p
            .rank(&["Y.NS", "Z.NS", "X.NS"], 10)
            .await
            .into_iter()
            .map(|r| r.ticker)
            .collect();
        assert_eq!(tickers, vec!["Y.NS", "Z.NS", "X.NS"]);
    }

    #[tokio::test]
    async fn test_total_failure_excluded() {
        let source = StaticProvider::new("a").with("GOOD.NS", roe(0.2));
        let p = pipeline(vec![Box::new(FailingProvider), Box::new(source)]);

        let results = p.rank(&["GOOD.NS", "GONE.NS"], 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].ticker, "GOOD.NS");
        assert!(p.evaluate("GONE.NS").await.is_none());
    }

    #[tokio::test]
    async fn test_top_n_zero_is_empty() {
        let source = StaticProvider::new("a").with("A.NS", roe(0.2));
        let p = pipeline(vec![Box::new(source)]);
        assert!(p.rank(&["A.NS"], 0).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicates_are_kept() {
        let source = StaticProvider::new("a").with("A.NS", roe(0.2));
        let p = pipeline(vec![Box::new(source)]);
        assert_eq!(p.rank(&["A.NS", "A.NS"], 10).await.len(), 2);
    }

    #[tokio::test]
    async fn test_cleanup_zero_record_still_scored() {
        // Only a zero-weight metric was supplied; the ticker has data and
        // stays in, scored on its defaulted ROE.
        let source = StaticProvider::new("a")
            .with("A.NS", PartialMetrics::new().with(Metric::CurrentRatio, 1.3));
        let p = pipeline(vec![Box::new(source)]);

        let results = p.rank(&["A.NS"], 10).await;
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].score, 0.0);
        assert_eq!(results[0].metrics.get(Metric::Roe), Some(0.0));
        assert_eq!(results[0].metrics.get(Metric::DebtToEquity), None);
    }
}
