//! URL check route

use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use naksiter_common::CheckResponse;
use serde::Deserialize;

/// Build the check router
pub fn router() -> Router<AppState> {
    Router::new().route("/check", get(check_url))
}

/// Query params for URL check
#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    url: Option<String>,
    /// Any of "1", "true", "yes" adds the signal breakdown
    detail: Option<String>,
}

impl CheckQuery {
    fn wants_detail(&self) -> bool {
        self.detail
            .as_deref()
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false)
    }
}

/// Classify a URL. Always answers 200; failures become an `[오류]` result.
async fn check_url(State(state): State<AppState>, Query(query): Query<CheckQuery>) -> Json<CheckResponse> {
    let detail = query.wants_detail();
    let url = query.url.unwrap_or_default();

    match state.engine.classify(&url).await {
        Ok(classification) => {
            if classification.verdict.is_danger() {
                tracing::info!("Flagged {} as {}", url.trim(), classification.verdict.label());
            }
            let mut response =
                CheckResponse::from_verdict(classification.verdict, classification.report_count);
            if detail {
                response.signals = classification.signals;
            }
            Json(response)
        }
        Err(e) => {
            tracing::debug!("Check rejected: {}", e);
            Json(CheckResponse::error(e))
        }
    }
}
