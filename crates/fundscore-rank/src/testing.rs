//! In-memory providers for tests.

use async_trait::async_trait;
use fundscore_traits::{FundscoreError, MetricProvider, PartialMetrics, Result};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Serves canned metrics per ticker and counts its calls.
#[derive(Debug, Clone)]
pub(crate) struct StaticProvider {
    name: &'static str,
    data: HashMap<String, PartialMetrics>,
    calls: Arc<AtomicUsize>,
}

impl StaticProvider {
    pub(crate) fn new(name: &'static str) -> Self {
        Self {
            name,
            data: HashMap::new(),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub(crate) fn with(mut self, ticker: &str, metrics: PartialMetrics) -> Self {
        self.data.insert(ticker.to_string(), metrics);
        self
    }

    /// Shared call counter; stays valid after the provider is boxed.
    pub(crate) fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl MetricProvider for StaticProvider {
    fn name(&self) -> &str {
        self.name
    }

    async fn fetch(&self, ticker: &str) -> Result<PartialMetrics> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.data.get(ticker).cloned().unwrap_or_default())
    }
}

/// Fails every call.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FailingProvider;

#[async_trait]
impl MetricProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn fetch(&self, ticker: &str) -> Result<PartialMetrics> {
        Err(FundscoreError::DataFetch(format!("connection refused for {ticker}")))
    }
}
