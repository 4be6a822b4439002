//! HTML extraction for screener.in company pages.
//!
//! Each metric lives in an `li` tagged with a `data-testid` attribute; the
//! figure itself is the `span.number` inside it.

use fundscore_traits::{Metric, PartialMetrics};
use scraper::{Html, Selector};

/// How a scraped figure is written on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// A bare number.
    Plain,
    /// A percentage, converted to a fraction.
    Percent,
    /// A currency amount, optionally in crores (`Cr`) or lakhs (`L`).
    Cash,
}

/// One crore.
const CRORE: f64 = 1e7;
/// One lakh.
const LAKH: f64 = 1e5;

/// Page fields in canonical metric order.
pub const FIELDS: [(Metric, &str, ValueKind); 6] = [
    (Metric::Roe, "roe", ValueKind::Percent),
    (Metric::DebtToEquity, "debt-to-equity", ValueKind::Plain),
    (Metric::NetProfitMargin, "net-profit-margin", ValueKind::Percent),
    (Metric::CurrentRatio, "current-ratio", ValueKind::Plain),
    (Metric::InterestCoverage, "interest-coverage", ValueKind::Plain),
    (Metric::FreeCashFlow, "free-cash-flow", ValueKind::Cash),
];

/// Parse a displayed figure into a number.
///
/// Thousands separators, currency marks and whitespace are ignored.
/// Percent values are always divided by 100, with or without a `%` sign.
#[must_use]
pub fn parse_value(raw: &str, kind: ValueKind) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | '₹') && !c.is_whitespace())
        .collect();
    let cleaned = cleaned.trim_end_matches('.');

    match kind {
        ValueKind::Plain => cleaned.parse().ok(),
        ValueKind::Percent => cleaned
            .trim_end_matches('%')
            .parse::<f64>()
            .ok()
            .map(|v| v / 100.0),
        ValueKind::Cash => {
            let (number, multiplier) = if let Some(n) = cleaned.strip_suffix("Cr") {
                (n, CRORE)
            } else if let Some(n) = cleaned.strip_suffix('L') {
                (n, LAKH)
            } else {
                (cleaned, 1.0)
            };
            number.parse::<f64>().ok().map(|v| v * multiplier)
        }
    }
}

/// Extract every available metric from a company page.
///
/// Fields that are missing from the page are skipped silently; fields that
/// are present but unparseable are skipped with a warning.
#[must_use]
pub fn extract_metrics(html: &str) -> PartialMetrics {
    let document = Html::parse_document(html);
    let mut metrics = PartialMetrics::new();

    for (metric, test_id, kind) in FIELDS {
        let css = format!(r#"li[data-testid="{test_id}"] span.number"#);
        let Ok(selector) = Selector::parse(&css) else {
            tracing::warn!(%metric, css = %css, "invalid selector");
            continue;
        };
        let Some(element) = document.select(&selector).next() else {
            continue;
        };

        let text: String = element.text().collect();
        match parse_value(&text, kind) {
            Some(value) => {
                metrics.insert(metric, value);
            }
            None => tracing::warn!(%metric, raw = text.trim(), "unparseable value"),
        }
    }

    metrics
}
