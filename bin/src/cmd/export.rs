//! Export command implementation.

use anyhow::{Context, Result};
use fundscore::report::ResultsExporter;
use fundscore::{ScoredResult, Settings};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Accepted layouts of a results file.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResultsFile {
    Bare(Vec<ScoredResult>),
    Wrapped { results: Vec<ScoredResult> },
}

impl ResultsFile {
    fn into_results(self) -> Vec<ScoredResult> {
        match self {
            Self::Bare(results) | Self::Wrapped { results } => results,
        }
    }
}

/// Parse a results file: a JSON array, or an object with a `results` array.
pub(crate) fn read_results(path: &Path) -> Result<Vec<ScoredResult>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: ResultsFile = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a valid results file", path.display()))?;
    Ok(file.into_results())
}

/// Write export tables for a saved results file.
pub(crate) fn export_results(settings: &Settings, input: &Path, output_dir: PathBuf) -> Result<()> {
    let results = read_results(input)?;
    let paths = ResultsExporter::new(output_dir).export(&results, &settings.metrics)?;

    println!("Exported {} result(s)", results.len());
    println!("  Results:    {}", paths.results.display());
    println!("  Parameters: {}", paths.parameters.display());
    Ok(())
}
