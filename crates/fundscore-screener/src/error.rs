//! Error types for the scraped-page provider.

use fundscore_traits::FundscoreError;
use thiserror::Error;

/// Errors that can occur while scraping a company page.
#[derive(Debug, Error)]
pub enum ScreenerError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The site answered with a non-success status.
    #[error("HTTP {status} for {url}")]
    Status {
        /// Response status code.
        status: u16,
        /// Requested URL.
        url: String,
    },
}

impl From<ScreenerError> for FundscoreError {
    fn from(err: ScreenerError) -> Self {
        Self::DataFetch(format!("screener: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = ScreenerError::Status {
            status: 404,
            url: "https://www.screener.in/company/NOPE/".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 404 for https://www.screener.in/company/NOPE/");

        let err: FundscoreError = err.into();
        assert!(matches!(err, FundscoreError::DataFetch(_)));
    }
}
