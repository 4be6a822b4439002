//! Rank command implementation.

use crate::{data, sources};
use anyhow::{Result, bail};
use clap::ValueEnum;
use fundscore::report::{ResultsExporter, render_ranking};
use fundscore::{ScoredResult, Settings};
use std::path::{Path, PathBuf};

/// Output format of the ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable table.
    Text,
    /// Rounded results as a JSON array.
    Json,
}

/// Options of a ranking run beyond the loaded settings.
#[derive(Debug)]
pub(crate) struct RankOptions {
    pub(crate) symbols: Vec<String>,
    pub(crate) file: Option<PathBuf>,
    pub(crate) suffix: Option<String>,
    pub(crate) top_n: Option<usize>,
    pub(crate) format: OutputFormat,
    pub(crate) export: Option<PathBuf>,
}

/// Plain symbols from the command line followed by those in the file.
pub(crate) fn collect_symbols(symbols: &[String], file: Option<&Path>) -> Result<Vec<String>> {
    let mut all = symbols.to_vec();
    if let Some(path) = file {
        all.extend(data::load_symbols(path)?);
    }
    Ok(all)
}

/// Rank the requested symbols and print (and optionally export) the result.
pub(crate) async fn rank(mut settings: Settings, options: RankOptions) -> Result<()> {
    if let Some(suffix) = options.suffix {
        settings.ticker_suffix = suffix;
    }
    let top_n = options.top_n.unwrap_or(settings.top_n);

    let symbols = collect_symbols(&options.symbols, options.file.as_deref())?;
    let tickers = settings.qualify(&symbols);
    if tickers.is_empty() {
        bail!("no stock symbols provided");
    }

    let pipeline = sources::build_pipeline(&settings)?;

    if options.format == OutputFormat::Text {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                   Fundamental Stock Ranking                  ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Analyzing {} stock(s), keeping top {top_n}...", tickers.len());
        println!(
            "Sources: {}",
            pipeline.reconciler().provider_names().collect::<Vec<_>>().join(" > ")
        );
        println!();
    }

    let results: Vec<ScoredResult> = pipeline
        .rank(&tickers, top_n)
        .await
        .iter()
        .map(ScoredResult::rounded)
        .collect();

    match options.format {
        OutputFormat::Text => print!("{}", render_ranking(&results)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&results)?),
    }

    if let Some(dir) = options.export {
        if results.is_empty() {
            tracing::warn!("nothing to export");
        } else {
            let paths = ResultsExporter::new(dir).export(&results, pipeline.engine().config())?;
            if options.format == OutputFormat::Text {
                println!("\nResults exported to {}", paths.results.display());
            }
            tracing::info!(path = %paths.parameters.display(), "parameters exported");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collect_symbols_without_file() {
        let symbols = vec!["TCS".to_string(), "INFY".to_string()];
        assert_eq!(collect_symbols(&symbols, None).unwrap(), symbols);
    }

    #[test]
    fn test_collect_symbols_appends_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("symbols.csv");
        std::fs::write(&path, "symbol,category\nHDFCBANK,Banks\n").unwrap();

        let symbols = collect_symbols(&["TCS".to_string()], Some(&path)).unwrap();
        assert_eq!(symbols, vec!["TCS", "HDFCBANK"]);
    }

    #[tokio::test]
    async fn test_rank_without_symbols_fails() {
        let options = RankOptions {
            symbols: vec![" ".to_string()],
            file: None,
            suffix: None,
            top_n: None,
            format: OutputFormat::Json,
            export: None,
        };
        assert!(rank(Settings::default(), options).await.is_err());
    }
}
