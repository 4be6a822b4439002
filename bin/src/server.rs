//! HTTP API for the fundscore CLI.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use fundscore::report::{ReportError, ResultsExporter};
use fundscore::{RankingPipeline, ScoredResult, Settings};
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, sync::Arc};
use tokio::sync::Mutex;

/// Shared handler state.
#[derive(Debug, Clone)]
pub(crate) struct AppState {
    pipeline: Arc<RankingPipeline>,
    settings: Arc<Settings>,
    /// Held for the duration of a ranking run so requests never overlap.
    run_lock: Arc<Mutex<()>>,
    exporter: ResultsExporter,
}

impl AppState {
    pub(crate) fn new(pipeline: RankingPipeline, settings: Settings, output_dir: PathBuf) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            settings: Arc::new(settings),
            run_lock: Arc::new(Mutex::new(())),
            exporter: ResultsExporter::new(output_dir),
        }
    }
}

/// Errors returned to HTTP clients as `{"error": message}`.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Export(#[from] ReportError),

    #[error("{0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::BadRequest(_) | Self::Export(ReportError::EmptyResults) => StatusCode::BAD_REQUEST,
            Self::Export(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        (status, Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct AnalyzeRequest {
    #[serde(default)]
    symbols: Vec<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct AnalyzeResponse {
    results: Vec<ScoredResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ExportRequest {
    #[serde(default)]
    results: Vec<ScoredResult>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ExportResponse {
    success: bool,
    file_path: String,
    parameters_path: String,
}

/// Build the API router.
pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/hello", get(hello))
        .route("/api/analyze", post(analyze))
        .route("/api/export", post(export))
        .with_state(state)
}

async fn hello() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Financial Analysis API is running!" }))
}

async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let symbols = payload.map(|Json(req)| req.symbols).unwrap_or_default();
    let tickers = state.settings.qualify(&symbols);
    if tickers.is_empty() {
        return Err(ApiError::BadRequest("No stock symbols provided".to_string()));
    }

    let _running = state.run_lock.lock().await;
    tracing::info!(count = tickers.len(), "analyze request");
    let results = state.pipeline.rank(&tickers, state.settings.top_n).await;

    Ok(Json(AnalyzeResponse {
        results: results.iter().map(ScoredResult::rounded).collect(),
    }))
}

async fn export(
    State(state): State<AppState>,
    payload: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<Json<ExportResponse>, ApiError> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    if req.results.is_empty() {
        return Err(ApiError::BadRequest("No results to export".to_string()));
    }

    let exporter = state.exporter.clone();
    let config = state.pipeline.engine().config().clone();
    tracing::info!(
        rows = req.results.len(),
        dir = %exporter.output_dir().display(),
        "export request"
    );
    let paths = tokio::task::spawn_blocking(move || exporter.export(&req.results, &config))
        .await
        .map_err(|e| ApiError::Internal(format!("export task failed: {e}")))??;

    Ok(Json(ExportResponse {
        success: true,
        file_path: paths.results.display().to_string(),
        parameters_path: paths.parameters.display().to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use fundscore::{Metric, MetricProvider, PartialMetrics, Reconciler, ScoringEngine};

    #[derive(Debug)]
    struct FixedRoe;

    #[async_trait]
    impl MetricProvider for FixedRoe {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch(&self, ticker: &str) -> fundscore::Result<PartialMetrics> {
            let roe = if ticker == "TCS.NS" { 0.3 } else { 0.1 };
            Ok(PartialMetrics::new().with(Metric::Roe, roe))
        }
    }

    fn state(output_dir: PathBuf) -> AppState {
        let settings = Settings::default();
        let pipeline = RankingPipeline::new(
            Reconciler::new(vec![Box::new(FixedRoe)]),
            ScoringEngine::new(settings.metrics.clone()),
        );
        AppState::new(pipeline, settings, output_dir)
    }

    #[tokio::test]
    async fn test_hello() {
        let Json(body) = hello().await;
        assert_eq!(body["message"], "Financial Analysis API is running!");
    }

    #[tokio::test]
    async fn test_analyze_ranks_qualified_symbols() {
        let req = AnalyzeRequest {
            symbols: vec!["infy".to_string(), " tcs ".to_string()],
        };
        let Json(resp) = analyze(State(state(PathBuf::from("data"))), Ok(Json(req)))
            .await
            .unwrap();

        let tickers: Vec<&str> = resp.results.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["TCS.NS", "INFY.NS"]);
        assert!(resp.results[0].score > resp.results[1].score);
    }

    #[tokio::test]
    async fn test_analyze_rejects_empty_symbols() {
        let req = AnalyzeRequest {
            symbols: vec!["  ".to_string()],
        };
        let err = analyze(State(state(PathBuf::from("data"))), Ok(Json(req)))
            .await
            .unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(m) if m == "No stock symbols provided"));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_export_rejects_empty_results() {
        let req = ExportRequest { results: Vec::new() };
        let err = export(State(state(PathBuf::from("data"))), Ok(Json(req)))
            .await
            .unwrap_err();
        assert!(matches!(&err, ApiError::BadRequest(m) if m == "No results to export"));
    }

    #[tokio::test]
    async fn test_export_writes_files() {
        let dir = tempfile::TempDir::new().unwrap();
        let results: Vec<ScoredResult> = serde_json::from_value(serde_json::json!([{
            "ticker": "TCS.NS",
            "score": 81.5,
            "metrics": {
                "roe": 0.51,
                "debt_to_equity": null,
                "net_profit_margin": 0.19,
                "current_ratio": 2.4,
                "interest_coverage": null,
                "free_cash_flow": 4.2e11
            }
        }]))
        .unwrap();

        let Json(resp) = export(
            State(state(dir.path().to_path_buf())),
            Ok(Json(ExportRequest { results })),
        )
        .await
        .unwrap();

        assert!(resp.success);
        assert!(std::path::Path::new(&resp.file_path).exists());
        assert!(std::path::Path::new(&resp.parameters_path).exists());
    }

    #[test]
    fn test_export_request_rejects_bad_metric_keys() {
        let parsed: Result<ExportRequest, _> = serde_json::from_value(serde_json::json!({
            "results": [{ "ticker": "X.NS", "score": 1.0, "metrics": { "roe": 0.1 } }]
        }));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            ApiError::Export(ReportError::EmptyResults).into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".to_string()).into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_router_builds() {
        let _router = router(state(PathBuf::from("data")));
    }
}
