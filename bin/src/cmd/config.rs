//! Config command implementation.

use anyhow::Result;
use fundscore::Settings;

/// Print the effective settings as JSON.
pub(crate) fn show_config(settings: &Settings) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(settings)?);
    Ok(())
}
