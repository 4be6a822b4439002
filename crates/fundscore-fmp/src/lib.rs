//! Financial Modeling Prep (FMP) API client and metric providers for fundscore.
//!
//! This crate provides a client for fetching fundamental financial data from
//! the [Financial Modeling Prep](https://financialmodelingprep.com/) API and two
//! [`MetricProvider`](fundscore_traits::MetricProvider) implementations on
//! top of it:
//!
//! - [`FmpRatiosProvider`] reads ready-made ratios (direct API source).
//! - [`FmpStatementsProvider`] derives ratios from raw financial statements.
//!
//! # Usage
//!
//! ```rust,ignore
//! use fundscore_fmp::{FmpClient, FmpStatementsProvider};
//! use fundscore_traits::MetricProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!     let provider = FmpStatementsProvider::new(client);
//!
//!     let metrics = provider.fetch("TCS.NS").await?;
//!     println!("{metrics:?}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod ratios;
mod statements;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use ratios::{FmpRatiosProvider, ratio_metrics};
pub use statements::{FmpStatementsProvider, derive_metrics};
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
