//! Weighted 0–100 scoring of reconciled records.

use fundscore_traits::{Direction, Metric, MetricConfig, MetricRecord};
use ndarray::Array1;

/// Best possible sub-score.
const MAX_SUB_SCORE: f64 = 100.0;
/// Sub-score of a value sitting exactly on its threshold.
const MID_SUB_SCORE: f64 = 50.0;

/// Scores a [`MetricRecord`] against per-metric weights and thresholds.
///
/// Each present metric gets a sub-score in `[0, 100]`. The total is the
/// weighted mean of sub-scores over present metrics only, so an absent
/// metric neither helps nor hurts.
///
/// # Examples
///
/// ```
/// use fundscore_rank::ScoringEngine;
/// use fundscore_traits::{Metric, MetricConfig, MetricRecord};
///
/// let engine = ScoringEngine::new(MetricConfig::default());
/// let record = MetricRecord::empty().with(Metric::Roe, 0.12);
///
/// assert_eq!(engine.score(&record), 50.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: MetricConfig,
}

impl ScoringEngine {
    /// Create an engine for the given configuration.
    #[must_use]
    pub const fn new(config: MetricConfig) -> Self {
        Self { config }
    }

    /// The configuration this engine scores against.
    #[must_use]
    pub const fn config(&self) -> &MetricConfig {
        &self.config
    }

    /// Sub-score of a single metric value, in `[0, 100]`.
    #[must_use]
    pub fn sub_score(&self, metric: Metric, value: f64) -> f64 {
        let spec = self.config.spec(metric);
        let threshold = spec.threshold;

        match spec.direction {
            Direction::Higher => {
                if value <= 0.0 {
                    0.0
                } else if value >= threshold * 2.0 {
                    MAX_SUB_SCORE
                } else {
                    (MID_SUB_SCORE + MID_SUB_SCORE * (value - threshold) / threshold)
                        .clamp(0.0, MAX_SUB_SCORE)
                }
            }
            Direction::Lower => {
                if value <= 0.0 && metric.optimal_at_zero() {
                    MAX_SUB_SCORE
                } else if value <= threshold / 2.0 {
                    MAX_SUB_SCORE
                } else if value <= threshold {
                    MID_SUB_SCORE + MID_SUB_SCORE * (threshold - value) / (threshold / 2.0)
                } else {
                    let excess = ((value - threshold) / threshold).min(1.0);
                    (MID_SUB_SCORE - MID_SUB_SCORE * excess).clamp(0.0, MAX_SUB_SCORE)
                }
            }
        }
    }

    /// Weighted score of a record, in `[0, 100]`.
    ///
    /// Returns 0 when no metric is present or the present metrics carry no
    /// weight.
    #[must_use]
    pub fn score(&self, record: &MetricRecord) -> f64 {
        let (subs, weights): (Vec<f64>, Vec<f64>) = record
            .iter()
            .filter_map(|(metric, value)| {
                value.map(|v| (self.sub_score(metric, v), self.config.spec(metric).weight))
            })
            .unzip();

        let subs = Array1::from_vec(subs);
        let weights = Array1::from_vec(weights);

        let possible = weights.sum() * MAX_SUB_SCORE;
        if possible <= 0.0 {
            return 0.0;
        }

        MAX_SUB_SCORE * subs.dot(&weights) / possible
    }
}
