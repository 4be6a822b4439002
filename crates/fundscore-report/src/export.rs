//! CSV export of ranked results and the parameters that produced them.

use chrono::{Local, NaiveDateTime};
use fundscore_traits::{Metric, MetricConfig, ScoredResult};
use polars::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::{
    error::{ReportError, Result},
    present::{NOT_AVAILABLE, crores, percent},
};

/// Results table column headers, in order.
pub const RESULT_COLUMNS: [&str; 8] = [
    "Ticker",
    "Score",
    "ROE",
    "Debt/Equity",
    "Net Profit Margin",
    "Current Ratio",
    "Interest Coverage",
    "Free Cash Flow (Cr)",
];

/// Where an export was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    /// The results table.
    pub results: PathBuf,
    /// The parameters table.
    pub parameters: PathBuf,
}

/// Writes result and parameter tables into a directory.
#[derive(Debug, Clone)]
pub struct ResultsExporter {
    output_dir: PathBuf,
}

impl ResultsExporter {
    /// Create an exporter writing into `output_dir`, created on demand.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Target directory.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Export with the current local time as the analysis timestamp.
    ///
    /// # Errors
    ///
    /// See [`ResultsExporter::export_at`].
    pub fn export(&self, results: &[ScoredResult], config: &MetricConfig) -> Result<ExportPaths> {
        self.export_at(results, config, Local::now().naive_local())
    }

    /// Export both tables, stamping file names and contents with `at`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::EmptyResults`] for an empty slice, or an I/O
    /// or Polars error if a table cannot be built or written.
    pub fn export_at(
        &self,
        results: &[ScoredResult],
        config: &MetricConfig,
        at: NaiveDateTime,
    ) -> Result<ExportPaths> {
        if results.is_empty() {
            return Err(ReportError::EmptyResults);
        }

        fs::create_dir_all(&self.output_dir)?;
        let stem = format!("stock_analysis_{}", at.format("%Y%m%d_%H%M%S"));
        let paths = ExportPaths {
            results: self.output_dir.join(format!("{stem}_results.csv")),
            parameters: self.output_dir.join(format!("{stem}_parameters.csv")),
        };

        write_csv(&mut results_frame(results)?, &paths.results)?;
        write_csv(&mut parameters_frame(config, results.len(), at)?, &paths.parameters)?;

        tracing::info!(
            rows = results.len(),
            path = %paths.results.display(),
            "results exported"
        );
        Ok(paths)
    }
}

fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).include_header(true).finish(df)?;
    Ok(())
}

fn cell(value: Option<f64>, format: fn(f64) -> String) -> String {
    value.map_or_else(|| NOT_AVAILABLE.to_string(), format)
}

fn two_places(value: f64) -> String {
    format!("{value:.2}")
}

/// Build the results table: one row per result, every cell preformatted.
///
/// # Errors
///
/// Returns an error if Polars cannot assemble the frame.
pub fn results_frame(results: &[ScoredResult]) -> PolarsResult<DataFrame> {
    let column = |metric: Metric, format: fn(f64) -> String| -> Vec<String> {
        results
            .iter()
            .map(|r| cell(r.metrics.get(metric), format))
            .collect()
    };

    let tickers: Vec<&str> = results.iter().map(|r| r.ticker.as_str()).collect();
    let scores: Vec<String> = results.iter().map(|r| two_places(r.score)).collect();

    df! {
        RESULT_COLUMNS[0] => tickers,
        RESULT_COLUMNS[1] => scores,
        RESULT_COLUMNS[2] => column(Metric::Roe, percent),
        RESULT_COLUMNS[3] => column(Metric::DebtToEquity, two_places),
        RESULT_COLUMNS[4] => column(Metric::NetProfitMargin, percent),
        RESULT_COLUMNS[5] => column(Metric::CurrentRatio, two_places),
        RESULT_COLUMNS[6] => column(Metric::InterestCoverage, two_places),
        RESULT_COLUMNS[7] => column(Metric::FreeCashFlow, crores),
    }
}

/// Build the two-column parameters table describing an analysis run.
///
/// # Errors
///
/// Returns an error if Polars cannot assemble the frame.
pub fn parameters_frame(
    config: &MetricConfig,
    stock_count: usize,
    at: NaiveDateTime,
) -> PolarsResult<DataFrame> {
    let mut rows: Vec<(String, String)> = vec![
        ("Analysis Date".into(), at.format("%Y-%m-%d %H:%M:%S").to_string()),
        ("Number of Stocks Analyzed".into(), stock_count.to_string()),
        (String::new(), String::new()),
        ("Metric Weights".into(), String::new()),
    ];
    rows.extend(
        config
            .iter()
            .map(|(metric, spec)| (format!("  {metric}"), two_places(spec.weight))),
    );

    rows.push((String::new(), String::new()));
    rows.push(("Thresholds".into(), String::new()));
    rows.extend(config.iter().map(|(metric, spec)| {
        let value = if metric == Metric::FreeCashFlow {
            format!("₹{} Cr", crores(spec.threshold))
        } else if metric.is_percentage() {
            percent(spec.threshold)
        } else {
            two_places(spec.threshold)
        };
        (format!("  {metric}"), value)
    }));

    rows.push((String::new(), String::new()));
    rows.push(("Directions".into(), String::new()));
    rows.extend(
        config
            .iter()
            .map(|(metric, spec)| (format!("  {metric}"), spec.direction.to_string())),
    );

    let (names, values): (Vec<String>, Vec<String>) = rows.into_iter().unzip();
    df! {
        "Parameter" => names,
        "Value" => values,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fundscore_traits::MetricRecord;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 15)
            .unwrap()
            .and_hms_opt(9, 30, 5)
            .unwrap()
    }

    fn results() -> Vec<ScoredResult> {
        vec![
            ScoredResult::new(
                "TCS.NS",
                78.4567,
                MetricRecord::empty()
                    .with(Metric::Roe, 0.515)
                    .with(Metric::DebtToEquity, 0.09)
                    .with(Metric::NetProfitMargin, 0.192)
                    .with(Metric::FreeCashFlow, 4.1965e11),
            ),
            ScoredResult::new("INFY.NS", 55.0, MetricRecord::empty().with(Metric::Roe, 0.3)),
        ]
    }

    fn str_cell(df: &DataFrame, column: &str, row: usize) -> String {
        df.column(column)
            .unwrap()
            .as_materialized_series()
            .str()
            .unwrap()
            .get(row)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_results_frame_shape() {
        let df = results_frame(&results()).unwrap();

        assert_eq!(df.shape(), (2, RESULT_COLUMNS.len()));
        let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
        assert_eq!(names, RESULT_COLUMNS);

        assert_eq!(str_cell(&df, "Ticker", 0), "TCS.NS");
        assert_eq!(str_cell(&df, "Score", 0), "78.46");
        assert_eq!(str_cell(&df, "ROE", 0), "51.50%");
        assert_eq!(str_cell(&df, "Free Cash Flow (Cr)", 0), "41965.0");
        assert_eq!(str_cell(&df, "Current Ratio", 0), "N/A");
        assert_eq!(str_cell(&df, "Free Cash Flow (Cr)", 1), "N/A");
    }

    #[test]
    fn test_parameters_frame() {
        let df = parameters_frame(&MetricConfig::default(), 2, at()).unwrap();
        let names = df.column("Parameter").unwrap().as_materialized_series().str().unwrap().clone();
        let row = |label: &str| -> usize {
            names
                .iter()
                .position(|n| n == Some(label))
                .unwrap_or_else(|| panic!("missing row {label}"))
        };

        assert_eq!(str_cell(&df, "Value", row("Analysis Date")), "2024-03-15 09:30:05");
        assert_eq!(str_cell(&df, "Value", row("Number of Stocks Analyzed")), "2");

        let weights = row("Metric Weights");
        assert_eq!(str_cell(&df, "Parameter", weights + 1), "  roe");
        assert_eq!(str_cell(&df, "Value", weights + 1), "0.25");

        let thresholds = row("Thresholds");
        assert_eq!(str_cell(&df, "Value", thresholds + 1), "12.00%");
        assert_eq!(str_cell(&df, "Value", thresholds + 2), "2.00");
        assert_eq!(str_cell(&df, "Value", thresholds + 6), "₹-100.0 Cr");

        let directions = row("Directions");
        assert_eq!(str_cell(&df, "Value", directions + 2), "lower");
    }

    #[test]
    fn test_export_writes_both_tables() {
        let dir = tempfile::TempDir::new().unwrap();
        let exporter = ResultsExporter::new(dir.path().join("nested"));

        let paths = exporter
            .export_at(&results(), &MetricConfig::default(), at())
            .unwrap();

        assert_eq!(paths.results.parent(), Some(exporter.output_dir()));
        assert!(paths.results.ends_with("stock_analysis_20240315_093005_results.csv"));
        assert!(paths.parameters.ends_with("stock_analysis_20240315_093005_parameters.csv"));

        let text = fs::read_to_string(&paths.results).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("Ticker,Score,ROE,Debt/Equity"));
        assert!(lines.next().unwrap().starts_with("TCS.NS,78.46,51.50%,0.09"));
        assert!(text.contains("N/A"));
        assert!(paths.parameters.exists());
    }

    #[test]
    fn test_export_rejects_empty() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = ResultsExporter::new(dir.path())
            .export_at(&[], &MetricConfig::default(), at())
            .unwrap_err();
        assert!(matches!(err, ReportError::EmptyResults));
    }
}
