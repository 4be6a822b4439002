//! Scraped-page metric provider for fundscore.
//!
//! [`ScreenerProvider`] reads the headline ratios of a company page on
//! [screener.in](https://www.screener.in) and maps them onto the canonical
//! metric set. It is the only provider with an etiquette contract: every
//! call is followed by a fixed pause.
//!
//! ```rust,ignore
//! use std::time::Duration;
//! use fundscore_screener::ScreenerProvider;
//! use fundscore_traits::MetricProvider;
//!
//! let provider = ScreenerProvider::new(
//!     "https://www.screener.in",
//!     "Mozilla/5.0",
//!     ".NS",
//!     Duration::from_secs(3),
//! )?;
//! let metrics = provider.fetch("TCS.NS").await?;
//! ```

mod error;
pub mod parse;
mod provider;

pub use error::ScreenerError;
pub use parse::{ValueKind, extract_metrics, parse_value};
pub use provider::ScreenerProvider;
