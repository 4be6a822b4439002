//! Provider construction for the fundscore CLI.

use fundscore::fmp::{FmpClient, FmpRatiosProvider, FmpStatementsProvider};
use fundscore::screener::ScreenerProvider;
use fundscore::{
    FundscoreError, MetricProvider, RankingPipeline, Reconciler, ScoringEngine, Settings, SourceId,
};
use std::time::Duration;

/// FMP client from the environment, or `None` with a warning.
pub(crate) fn fmp_client_from_env() -> Option<FmpClient> {
    match FmpClient::from_env() {
        Ok(client) => Some(client),
        Err(e) => {
            tracing::warn!(error = %e, "FMP sources unavailable");
            None
        }
    }
}

/// Instantiate the configured sources in priority order.
///
/// FMP sources are skipped when no client is available.
pub(crate) fn build_providers(
    settings: &Settings,
    fmp: Option<&FmpClient>,
) -> Result<Vec<Box<dyn MetricProvider>>, FundscoreError> {
    let mut providers: Vec<Box<dyn MetricProvider>> = Vec::with_capacity(settings.sources.len());

    for source in &settings.sources {
        match (source, fmp) {
            (SourceId::FmpRatios, Some(client)) => {
                providers.push(Box::new(FmpRatiosProvider::new(client.clone())));
            }
            (SourceId::FmpStatements, Some(client)) => {
                providers.push(Box::new(FmpStatementsProvider::new(client.clone())));
            }
            (SourceId::FmpRatios | SourceId::FmpStatements, None) => {
                tracing::warn!(%source, "FMP_API_KEY not set, source skipped");
            }
            (SourceId::Screener, _) => {
                providers.push(Box::new(ScreenerProvider::new(
                    &settings.screener_base_url,
                    &settings.user_agent,
                    &settings.ticker_suffix,
                    Duration::from_secs(settings.scraper_delay_secs),
                )?));
            }
        }
    }

    if providers.is_empty() {
        return Err(FundscoreError::InvalidConfig(
            "no metric source is available".to_string(),
        ));
    }
    Ok(providers)
}

/// Build the ranking pipeline for `settings`, reading the FMP key from the
/// environment.
pub(crate) fn build_pipeline(settings: &Settings) -> Result<RankingPipeline, FundscoreError> {
    let fmp = fmp_client_from_env();
    let providers = build_providers(settings, fmp.as_ref())?;
    let reconciler = Reconciler::new(providers);
    tracing::info!(
        sources = ?reconciler.provider_names().collect::<Vec<_>>(),
        "pipeline ready"
    );
    Ok(RankingPipeline::new(
        reconciler,
        ScoringEngine::new(settings.metrics.clone()),
    ))
}
