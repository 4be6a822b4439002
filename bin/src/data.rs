//! Symbol list loading for the fundscore CLI.

use fundscore::FundscoreError;
use polars::prelude::*;
use std::path::Path;

/// Column holding the plain exchange symbol.
const SYMBOL_COLUMN: &str = "symbol";

/// Load plain symbols from a CSV file with a `symbol` column.
///
/// Other columns (company name, category, ...) are ignored, as are empty
/// cells.
pub(crate) fn load_symbols(path: &Path) -> Result<Vec<String>, FundscoreError> {
    let parse_err = |e: PolarsError| FundscoreError::Parse(format!("{}: {e}", path.display()));

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(parse_err)?
        .finish()
        .map_err(parse_err)?;

    let column = df.column(SYMBOL_COLUMN).map_err(|_| {
        FundscoreError::InvalidRecord(format!(
            "{} has no '{SYMBOL_COLUMN}' column",
            path.display()
        ))
    })?;

    // Numeric-looking codes are read as integers; compare them as text.
    let symbols = column
        .as_materialized_series()
        .cast(&DataType::String)
        .map_err(parse_err)?;

    Ok(symbols
        .str()
        .map_err(parse_err)?
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect())
}
