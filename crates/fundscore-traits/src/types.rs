//! Common types used throughout the fundscore framework.
//!
//! This module defines the closed metric vocabulary, the per-provider
//! partial result, the reconciled metric record and the scored output row.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use crate::FundscoreError;

/// An exchange-qualified security identifier, e.g. `"TCS.NS"`.
pub type Ticker = String;

/// One of the six fundamental metrics used for scoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Return on equity (fraction, 0.15 = 15%).
    Roe,
    /// Total debt divided by shareholders' equity.
    DebtToEquity,
    /// Net income divided by revenue (fraction).
    NetProfitMargin,
    /// Current assets divided by current liabilities.
    CurrentRatio,
    /// EBIT divided by interest expense.
    InterestCoverage,
    /// Free cash flow in reporting currency.
    FreeCashFlow,
}

impl Metric {
    /// Every metric, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Roe,
        Self::DebtToEquity,
        Self::NetProfitMargin,
        Self::CurrentRatio,
        Self::InterestCoverage,
        Self::FreeCashFlow,
    ];

    /// Canonical snake_case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Roe => "roe",
            Self::DebtToEquity => "debt_to_equity",
            Self::NetProfitMargin => "net_profit_margin",
            Self::CurrentRatio => "current_ratio",
            Self::InterestCoverage => "interest_coverage",
            Self::FreeCashFlow => "free_cash_flow",
        }
    }

    /// Human-readable column label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Roe => "ROE",
            Self::DebtToEquity => "Debt/Equity",
            Self::NetProfitMargin => "Net Profit Margin",
            Self::CurrentRatio => "Current Ratio",
            Self::InterestCoverage => "Interest Coverage",
            Self::FreeCashFlow => "Free Cash Flow",
        }
    }

    /// Position of this metric in [`Metric::ALL`].
    #[must_use]
    pub const fn index(&self) -> usize {
        match self {
            Self::Roe => 0,
            Self::DebtToEquity => 1,
            Self::NetProfitMargin => 2,
            Self::CurrentRatio => 3,
            Self::InterestCoverage => 4,
            Self::FreeCashFlow => 5,
        }
    }

    /// Whether a zero or negative value is automatically ideal for a
    /// lower-is-better metric.
    ///
    /// Debt-to-equity is the exception: a zero or negative ratio can mean
    /// negative equity, so it is graded against its threshold instead.
    #[must_use]
    pub const fn optimal_at_zero(&self) -> bool {
        !matches!(self, Self::DebtToEquity)
    }

    /// Whether the metric is a fraction that reads best as a percentage.
    #[must_use]
    pub const fn is_percentage(&self) -> bool {
        matches!(self, Self::Roe | Self::NetProfitMargin)
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Metric {
    type Err = FundscoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| FundscoreError::Parse(format!("Unknown metric: '{s}'")))
    }
}

/// Metrics produced by a single provider call.
///
/// Only the metrics a provider actually produced are present. Non-finite
/// values are dropped on insertion, so a stored value is always usable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartialMetrics {
    values: BTreeMap<Metric, f64>,
}

impl PartialMetrics {
    /// Create an empty result.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            values: BTreeMap::new(),
        }
    }

    /// Insert a value, replacing any previous one for the same metric.
    ///
    /// Returns `false` (and stores nothing) if the value is not finite.
    pub fn insert(&mut self, metric: Metric, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        self.values.insert(metric, value);
        true
    }

    /// Insert a value if one is present.
    pub fn insert_opt(&mut self, metric: Metric, value: Option<f64>) {
        if let Some(v) = value {
            self.insert(metric, v);
        }
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, metric: Metric, value: f64) -> Self {
        self.insert(metric, value);
        self
    }

    /// Value for a metric, if produced.
    #[must_use]
    pub fn get(&self, metric: Metric) -> Option<f64> {
        self.values.get(&metric).copied()
    }

    /// Number of metrics produced.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was produced.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over produced metrics in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, f64)> + '_ {
        self.values.iter().map(|(m, v)| (*m, *v))
    }
}

impl FromIterator<(Metric, f64)> for PartialMetrics {
    fn from_iter<I: IntoIterator<Item = (Metric, f64)>>(iter: I) -> Self {
        let mut partial = Self::new();
        for (metric, value) in iter {
            partial.insert(metric, value);
        }
        partial
    }
}

/// First-writer-wins merge of a single field.
///
/// An existing value is kept; an incoming value only fills an absence.
#[must_use]
pub const fn merge(existing: Option<f64>, incoming: Option<f64>) -> Option<f64> {
    match existing {
        Some(v) => Some(v),
        None => incoming,
    }
}

/// The reconciled set of six metrics for one security.
///
/// The shape is fixed: every metric has a slot, and a slot is either a
/// value or an explicit absence. Deserialization requires exactly the six
/// metric keys (values may be `null`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Option<f64>>")]
pub struct MetricRecord {
    roe: Option<f64>,
    debt_to_equity: Option<f64>,
    net_profit_margin: Option<f64>,
    current_ratio: Option<f64>,
    interest_coverage: Option<f64>,
    free_cash_flow: Option<f64>,
}

impl MetricRecord {
    /// A record with every metric absent.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            roe: None,
            debt_to_equity: None,
            net_profit_margin: None,
            current_ratio: None,
            interest_coverage: None,
            free_cash_flow: None,
        }
    }

    /// Value of a metric, if present.
    #[must_use]
    pub const fn get(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Roe => self.roe,
            Metric::DebtToEquity => self.debt_to_equity,
            Metric::NetProfitMargin => self.net_profit_margin,
            Metric::CurrentRatio => self.current_ratio,
            Metric::InterestCoverage => self.interest_coverage,
            Metric::FreeCashFlow => self.free_cash_flow,
        }
    }

    const fn slot_mut(&mut self, metric: Metric) -> &mut Option<f64> {
        match metric {
            Metric::Roe => &mut self.roe,
            Metric::DebtToEquity => &mut self.debt_to_equity,
            Metric::NetProfitMargin => &mut self.net_profit_margin,
            Metric::CurrentRatio => &mut self.current_ratio,
            Metric::InterestCoverage => &mut self.interest_coverage,
            Metric::FreeCashFlow => &mut self.free_cash_flow,
        }
    }

    /// Overwrite a slot unconditionally.
    pub const fn set(&mut self, metric: Metric, value: Option<f64>) {
        *self.slot_mut(metric) = value;
    }

    /// Builder-style [`MetricRecord::set`] with a present value.
    #[must_use]
    pub const fn with(mut self, metric: Metric, value: f64) -> Self {
        self.set(metric, Some(value));
        self
    }

    /// Fill a slot only if it is still absent. Returns whether it was filled.
    pub fn fill(&mut self, metric: Metric, value: f64) -> bool {
        let slot = self.slot_mut(metric);
        let was_absent = slot.is_none();
        *slot = merge(*slot, Some(value));
        was_absent
    }

    /// Fill every absent slot that the partial result provides.
    ///
    /// Returns the number of slots filled.
    pub fn merge_partial(&mut self, partial: &PartialMetrics) -> usize {
        partial
            .iter()
            .filter(|(metric, value)| self.fill(*metric, *value))
            .count()
    }

    /// Number of present metrics.
    #[must_use]
    pub fn present_count(&self) -> usize {
        Metric::ALL
            .iter()
            .filter(|m| self.get(**m).is_some())
            .count()
    }

    /// Whether all six metrics are present.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.present_count() == Metric::ALL.len()
    }

    /// Whether every metric is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.present_count() == 0
    }

    /// Iterate over all six slots in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Metric, Option<f64>)> + '_ {
        Metric::ALL.into_iter().map(|m| (m, self.get(m)))
    }

    /// Copy with every present value rounded to `places` decimals.
    #[must_use]
    pub fn rounded(&self, places: i32) -> Self {
        let mut out = *self;
        for metric in Metric::ALL {
            out.set(metric, self.get(metric).map(|v| round_to(v, places)));
        }
        out
    }
}

impl TryFrom<BTreeMap<String, Option<f64>>> for MetricRecord {
    type Error = FundscoreError;

    fn try_from(map: BTreeMap<String, Option<f64>>) -> Result<Self, Self::Error> {
        {
            let expected: BTreeSet<&str> = Metric::ALL.iter().map(Metric::as_str).collect();
            let given: BTreeSet<&str> = map.keys().map(String::as_str).collect();

            let missing: Vec<&str> = expected.difference(&given).copied().collect();
            let unknown: Vec<&str> = given.difference(&expected).copied().collect();
            if !missing.is_empty() || !unknown.is_empty() {
                return Err(FundscoreError::InvalidRecord(format!(
                    "missing keys {missing:?}, unknown keys {unknown:?}"
                )));
            }
        }

        let mut record = Self::empty();
        for (key, value) in map {
            let metric: Metric = key.parse()?;
            record.set(metric, value);
        }
        Ok(record)
    }
}

/// Round to a fixed number of decimal places.
#[must_use]
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// A scored security: the ranking pipeline's output row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredResult {
    /// Exchange-qualified ticker.
    pub ticker: Ticker,
    /// Weighted score in `[0, 100]`.
    pub score: f64,
    /// The reconciled metrics the score was computed from.
    pub metrics: MetricRecord,
}

impl ScoredResult {
    /// Create a new scored result.
    pub fn new(ticker: impl Into<Ticker>, score: f64, metrics: MetricRecord) -> Self {
        Self {
            ticker: ticker.into(),
            score,
            metrics,
        }
    }

    /// The presentation form: score to 2 decimals, metrics to 4.
    #[must_use]
    pub fn rounded(&self) -> Self {
        Self {
            ticker: self.ticker.clone(),
            score: round_to(self.score, 2),
            metrics: self.metrics.rounded(4),
        }
    }
}
