//! Scraped-page metric provider.

use async_trait::async_trait;
use fundscore_traits::{MetricProvider, PartialMetrics};
use reqwest::Client;
use std::time::Duration;

use crate::{error::ScreenerError, parse::extract_metrics};

/// Upper bound on a single page request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Scrapes ratios from screener.in company pages.
///
/// Every call, successful or not, is followed by a fixed pause before
/// control returns to the caller, so sequential callers never exceed the
/// site's request budget.
#[derive(Debug, Clone)]
pub struct ScreenerProvider {
    client: Client,
    base_url: String,
    ticker_suffix: String,
    delay: Duration,
}

impl ScreenerProvider {
    /// Create a provider.
    ///
    /// `ticker_suffix` is stripped from incoming tickers to obtain the
    /// site's bare symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        ticker_suffix: impl Into<String>,
        delay: Duration,
    ) -> Result<Self, ScreenerError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            ticker_suffix: ticker_suffix.into(),
            delay,
        })
    }

    /// The pause applied after every call.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Bare symbol for an exchange-qualified ticker.
    #[must_use]
    pub fn symbol_for<'a>(&self, ticker: &'a str) -> &'a str {
        if self.ticker_suffix.is_empty() {
            return ticker;
        }
        ticker.strip_suffix(self.ticker_suffix.as_str()).unwrap_or(ticker)
    }

    /// Company page URL for a bare symbol.
    #[must_use]
    pub fn company_url(&self, symbol: &str) -> String {
        format!("{}/company/{symbol}/", self.base_url.trim_end_matches('/'))
    }

    async fn scrape(&self, ticker: &str) -> Result<PartialMetrics, ScreenerError> {
        let url = self.company_url(self.symbol_for(ticker));
        tracing::debug!(ticker, url = %url, "fetching company page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScreenerError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let html = response.text().await?;
        let metrics = extract_metrics(&html);
        tracing::debug!(ticker, count = metrics.len(), "screener metrics retrieved");
        Ok(metrics)
    }
}

#[async_trait]
impl MetricProvider for ScreenerProvider {
    fn name(&self) -> &str {
        "screener"
    }

    async fn fetch(&self, ticker: &str) -> fundscore_traits::Result<PartialMetrics> {
        let result = self.scrape(ticker).await;
        tokio::time::sleep(self.delay).await;
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    fn provider(base_url: &str, delay: Duration) -> ScreenerProvider {
        ScreenerProvider::new(base_url, "fundscore-test", ".NS", delay).unwrap()
    }

    #[test]
    fn test_symbol_for_strips_suffix() {
        let p = provider("https://www.screener.in", Duration::ZERO);
        assert_eq!(p.symbol_for("TCS.NS"), "TCS");
        assert_eq!(p.symbol_for("TCS.BO"), "TCS.BO");
        assert_eq!(p.symbol_for("INFY"), "INFY");
    }

    #[test]
    fn test_company_url() {
        let p = provider("https://www.screener.in/", Duration::ZERO);
        assert_eq!(p.company_url("TCS"), "https://www.screener.in/company/TCS/");
    }

    #[test]
    fn test_provider_name_and_delay() {
        let p = provider("https://www.screener.in", Duration::from_secs(3));
        assert_eq!(p.name(), "screener");
        assert_eq!(p.delay(), Duration::from_secs(3));
    }

    #[tokio::test]
    async fn test_delay_applies_after_failure() {
        // Nothing listens on the discard port, so the request fails fast.
        let delay = Duration::from_millis(200);
        let p = provider("http://127.0.0.1:9", delay);

        let started = Instant::now();
        let result = p.fetch("TCS.NS").await;

        assert!(result.is_err());
        assert!(started.elapsed() >= delay);
    }
}
