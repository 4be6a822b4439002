//! Human-readable formatting of ranked results.

use fundscore_traits::{Metric, ScoredResult};
use std::fmt;

/// Placeholder for an absent value.
pub const NOT_AVAILABLE: &str = "N/A";

const RULE_WIDTH: usize = 60;

/// Rupees per crore.
const CRORE: f64 = 1e7;

/// `0.1234` as `12.34%`.
#[must_use]
pub fn percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// A rupee amount in crores, one decimal.
#[must_use]
pub fn crores(value: f64) -> String {
    format!("{:.1}", value / CRORE)
}

/// Display form of a metric value, without units for plain ratios.
#[must_use]
pub fn format_metric(metric: Metric, value: Option<f64>) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) if metric.is_percentage() => percent(v),
        Some(v) if metric == Metric::FreeCashFlow => format!("₹{} Cr", crores(v)),
        Some(v) => format!("{v:.2}"),
    }
}

/// Render a ranked list the way the CLI prints it.
#[must_use]
pub fn render_ranking(results: &[ScoredResult]) -> String {
    RankingTable(results).to_string()
}

/// Console table of ranked results.
#[derive(Debug)]
struct RankingTable<'a>(&'a [ScoredResult]);

impl fmt::Display for RankingTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No stocks met the criteria.");
        }

        let rule = "─".repeat(RULE_WIDTH);
        writeln!(f, "Top Stocks Based on Fundamental Score:")?;
        writeln!(f, "{rule}")?;

        for (rank, result) in self.0.iter().enumerate() {
            writeln!(f, "{:>2}. {} | Score: {:.2}", rank + 1, result.ticker, result.score)?;
            for (metric, value) in result.metrics.iter() {
                let label = format!("{}:", metric.label());
                writeln!(f, "    {label:<18} {:>14}", format_metric(metric, value))?;
            }
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fundscore_traits::MetricRecord;

    #[test]
    fn test_format_metric() {
        assert_eq!(format_metric(Metric::Roe, Some(0.1234)), "12.34%");
        assert_eq!(format_metric(Metric::NetProfitMargin, Some(0.08)), "8.00%");
        assert_eq!(format_metric(Metric::DebtToEquity, Some(0.456)), "0.46");
        assert_eq!(format_metric(Metric::FreeCashFlow, Some(2.5e9)), "₹250.0 Cr");
        assert_eq!(format_metric(Metric::CurrentRatio, None), "N/A");
    }

    #[test]
    fn test_render_ranking() {
        let results = vec![
            ScoredResult::new(
                "TCS.NS",
                81.256,
                MetricRecord::empty()
                    .with(Metric::Roe, 0.5)
                    .with(Metric::FreeCashFlow, 4.2e11),
            ),
            ScoredResult::new("INFY.NS", 60.0, MetricRecord::empty()),
        ];

        let text = render_ranking(&results);
        assert!(text.contains(" 1. TCS.NS | Score: 81.26"));
        assert!(text.contains(" 2. INFY.NS | Score: 60.00"));
        assert!(text.contains("50.00%"));
        assert!(text.contains("₹42000.0 Cr"));
        assert!(text.contains("N/A"));
    }

    #[test]
    fn test_render_ranking_layout() {
        let results = vec![ScoredResult::new(
            "TCS.NS",
            70.0,
            MetricRecord::empty().with(Metric::CurrentRatio, 2.5),
        )];
        let text = render_ranking(&results);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Top Stocks Based on Fundamental Score:");
        assert_eq!(lines[1], "─".repeat(RULE_WIDTH));
        assert_eq!(lines[2], " 1. TCS.NS | Score: 70.00");
        assert_eq!(lines.len(), 3 + Metric::ALL.len() + 1);
        assert_eq!(lines.last().copied(), Some(lines[1]));
        assert!(lines.contains(&format!("    {:<18} {:>14}", "Current Ratio:", "2.50").as_str()));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render_ranking(&[]), "No stocks met the criteria.\n");
    }
}
