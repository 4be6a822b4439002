//! Scoring configuration and runtime settings.
//!
//! [`MetricConfig`] holds the weight, threshold and direction of every
//! metric and is validated once at construction; lookups afterwards cannot
//! fail. [`Settings`] is the full configuration surface loaded at startup.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::Path;

use crate::{FundscoreError, Metric, Result};

/// Tolerance for the weight-sum check.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Whether a higher or lower raw value is favorable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Higher values are better.
    Higher,
    /// Lower values are better.
    Lower,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Higher => f.write_str("higher"),
            Self::Lower => f.write_str("lower"),
        }
    }
}

/// Scoring parameters for a single metric.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricSpec {
    /// Share of the total score (all six sum to 1.0).
    pub weight: f64,
    /// Breakpoint value that earns exactly 50 points.
    pub threshold: f64,
    /// Favorable direction.
    pub direction: Direction,
}

impl MetricSpec {
    /// Create a new metric spec.
    #[must_use]
    pub const fn new(weight: f64, threshold: f64, direction: Direction) -> Self {
        Self {
            weight,
            threshold,
            direction,
        }
    }
}

/// Validated per-metric scoring configuration.
///
/// # Example
///
/// ```
/// use fundscore_traits::{Direction, Metric, MetricConfig};
///
/// let config = MetricConfig::default();
/// assert_eq!(config.spec(Metric::DebtToEquity).direction, Direction::Lower);
///
/// let custom = config.with_spec(Metric::Roe, 0.25, 0.20, Direction::Higher).unwrap();
/// assert_eq!(custom.spec(Metric::Roe).threshold, 0.20);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(
    try_from = "BTreeMap<Metric, MetricSpec>",
    into = "BTreeMap<Metric, MetricSpec>"
)]
pub struct MetricConfig {
    specs: [MetricSpec; 6],
}

impl MetricConfig {
    /// Build a configuration from a per-metric map.
    ///
    /// # Errors
    ///
    /// Returns [`FundscoreError::InvalidConfig`] if a metric is missing, a
    /// weight is negative or non-finite, a threshold is non-finite, a
    /// lower-is-better threshold is not positive, or the weights do not sum
    /// to 1.0.
    pub fn new(specs: BTreeMap<Metric, MetricSpec>) -> Result<Self> {
        let mut table = [MetricSpec::new(0.0, 0.0, Direction::Higher); 6];
        for metric in Metric::ALL {
            let spec = specs.get(&metric).ok_or_else(|| {
                FundscoreError::InvalidConfig(format!("no configuration for metric '{metric}'"))
            })?;
            table[metric.index()] = *spec;
        }
        Self::from_table(table)
    }

    fn from_table(specs: [MetricSpec; 6]) -> Result<Self> {
        for metric in Metric::ALL {
            let spec = specs[metric.index()];
            if !spec.weight.is_finite() || spec.weight < 0.0 {
                return Err(FundscoreError::InvalidConfig(format!(
                    "weight for '{metric}' must be a non-negative number, got {}",
                    spec.weight
                )));
            }
            if !spec.threshold.is_finite() {
                return Err(FundscoreError::InvalidConfig(format!(
                    "threshold for '{metric}' must be finite"
                )));
            }
            if spec.direction == Direction::Lower && spec.threshold <= 0.0 {
                return Err(FundscoreError::InvalidConfig(format!(
                    "threshold for lower-is-better '{metric}' must be positive, got {}",
                    spec.threshold
                )));
            }
        }

        let total: f64 = specs.iter().map(|s| s.weight).sum();
        if (total - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(FundscoreError::InvalidConfig(format!(
                "metric weights must sum to 1.0, got {total:.6}"
            )));
        }

        Ok(Self { specs })
    }

    /// Scoring parameters for a metric.
    #[must_use]
    pub const fn spec(&self, metric: Metric) -> &MetricSpec {
        &self.specs[metric.index()]
    }

    /// Iterate over all metrics with their parameters.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, &MetricSpec)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.spec(m)))
    }

    /// Copy of this configuration with one metric replaced.
    ///
    /// # Errors
    ///
    /// Returns [`FundscoreError::InvalidConfig`] if the result no longer
    /// validates (e.g. weights stop summing to 1.0).
    pub fn with_spec(
        &self,
        metric: Metric,
        weight: f64,
        threshold: f64,
        direction: Direction,
    ) -> Result<Self> {
        let mut specs = self.specs;
        specs[metric.index()] = MetricSpec::new(weight, threshold, direction);
        Self::from_table(specs)
    }
}

impl Default for MetricConfig {
    fn default() -> Self {
        Self {
            specs: [
                MetricSpec::new(0.25, 0.12, Direction::Higher),
                MetricSpec::new(0.15, 2.0, Direction::Lower),
                MetricSpec::new(0.20, 0.08, Direction::Higher),
                MetricSpec::new(0.10, 1.2, Direction::Higher),
                MetricSpec::new(0.15, 2.0, Direction::Higher),
                // Large negative floor: positive free cash flow always clears it.
                MetricSpec::new(0.15, -1e9, Direction::Higher),
            ],
        }
    }
}

impl TryFrom<BTreeMap<Metric, MetricSpec>> for MetricConfig {
    type Error = FundscoreError;

    fn try_from(specs: BTreeMap<Metric, MetricSpec>) -> Result<Self> {
        Self::new(specs)
    }
}

impl From<MetricConfig> for BTreeMap<Metric, MetricSpec> {
    fn from(config: MetricConfig) -> Self {
        config.iter().map(|(m, s)| (m, *s)).collect()
    }
}

/// Identifier of a metric source, used to declare source priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceId {
    /// Ratios and key metrics straight from the Financial Modeling Prep API.
    FmpRatios,
    /// Ratios derived from Financial Modeling Prep financial statements.
    FmpStatements,
    /// Ratios scraped from the screener.in company page.
    Screener,
}

impl SourceId {
    /// Canonical identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FmpRatios => "fmp_ratios",
            Self::FmpStatements => "fmp_statements",
            Self::Screener => "screener",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full runtime configuration.
///
/// Every field has a default, so a settings file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Per-metric weights, thresholds and directions.
    pub metrics: MetricConfig,
    /// Metric sources, highest priority first.
    pub sources: Vec<SourceId>,
    /// Pause after every scraped-page request, in seconds.
    pub scraper_delay_secs: u64,
    /// Exchange suffix appended to plain symbols.
    pub ticker_suffix: String,
    /// Number of ranked results to keep.
    pub top_n: usize,
    /// Base URL of the scraped site.
    pub screener_base_url: String,
    /// `User-Agent` sent with scraped-page requests.
    pub user_agent: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            metrics: MetricConfig::default(),
            sources: vec![SourceId::FmpRatios, SourceId::FmpStatements, SourceId::Screener],
            scraper_delay_secs: 3,
            ticker_suffix: ".NS".to_string(),
            top_n: 10,
            screener_base_url: "https://www.screener.in".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, or the defaults when `path` is `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the
    /// resulting settings fail [`Settings::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let settings = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                serde_json::from_str(&text)?
            }
            None => Self::default(),
        };
        settings.validate()?;
        Ok(settings)
    }

    /// Check the invariants serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns [`FundscoreError::InvalidConfig`] if no source is configured
    /// or a source is listed twice.
    pub fn validate(&self) -> Result<()> {
        if self.sources.is_empty() {
            return Err(FundscoreError::InvalidConfig(
                "at least one metric source must be configured".to_string(),
            ));
        }
        let mut seen = BTreeSet::new();
        for source in &self.sources {
            if !seen.insert(source) {
                return Err(FundscoreError::InvalidConfig(format!(
                    "source '{source}' is listed more than once"
                )));
            }
        }
        Ok(())
    }

    /// Append the configured exchange suffix to each plain symbol.
    ///
    /// Symbols are trimmed and upper-cased; blank entries are dropped.
    #[must_use]
    pub fn qualify<S: AsRef<str>>(&self, symbols: &[S]) -> Vec<String> {
        symbols
            .iter()
            .map(|s| s.as_ref().trim())
            .filter(|s| !s.is_empty())
            .map(|s| format!("{}{}", s.to_uppercase(), self.ticker_suffix))
            .collect()
    }
}
