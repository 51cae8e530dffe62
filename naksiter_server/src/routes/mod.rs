//! Route handlers for the Naksiter server

pub mod check;
pub mod preview;
pub mod report;

use crate::abuse::{LedgerConfig, RateLimitConfig, ReportLedger};
use crate::config::Config;
use crate::preview::{PreviewService, Summarizer};
use crate::probe::HttpProber;
use crate::reputation::{TrustIndex, VerdictEngine};
use axum::{extract::State, routing::get, Json, Router};
use naksiter_common::HealthResponse;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub ledger: Arc<ReportLedger>,
    pub engine: Arc<VerdictEngine<HttpProber>>,
    pub preview: Arc<PreviewService>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let ledger = Arc::new(ReportLedger::new(LedgerConfig {
            rate_limit: RateLimitConfig {
                window: config.report_cooldown,
            },
            max_reports: config.max_stored_reports,
        }));

        let trust = TrustIndex::new(&config.trusted_domains);
        let prober = HttpProber::new(config.probe_timeout)?;
        let engine = Arc::new(VerdictEngine::new(trust, prober, ledger.clone()));

        let summarizer = match &config.openai_api_key {
            Some(key) => Some(Summarizer::new(
                key.clone(),
                config.openai_model.clone(),
                config.openai_base_url.clone(),
            )?),
            None => None,
        };
        let preview = Arc::new(PreviewService::new(summarizer, config.probe_timeout * 2)?);

        Ok(Self {
            config: Arc::new(config),
            ledger,
            engine,
            preview,
        })
    }
}

/// Build the public router
pub fn router(state: AppState) -> Router {
    let static_dir = state.config.static_dir.clone();

    let app = Router::new()
        .route("/health", get(health_check))
        .merge(check::router())
        .merge(preview::router())
        .merge(report::router());

    let app = match static_dir {
        Some(dir) => app.fallback_service(ServeDir::new(dir)),
        None => app,
    };

    app.layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        reports: state.ledger.len().await,
        trusted_domains: state.engine.trust().len(),
        summarizer: state.preview.summarizer_enabled(),
    })
}
