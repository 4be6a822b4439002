//! Presentation and export of ranked results.
//!
//! [`render_ranking`] produces the console table; [`ResultsExporter`] writes
//! a results table and a parameters table as CSV files.

mod error;
mod export;
mod present;

pub use error::{ReportError, Result};
pub use export::{ExportPaths, RESULT_COLUMNS, ResultsExporter, parameters_frame, results_frame};
pub use present::{NOT_AVAILABLE, crores, format_metric, percent, render_ranking};
