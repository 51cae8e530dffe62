//! Page preview route

use crate::routes::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use naksiter_common::{constants, PreviewResponse};
use serde::Deserialize;

/// Build the preview router
pub fn router() -> Router<AppState> {
    Router::new().route("/preview", get(preview_url))
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    url: Option<String>,
}

/// Summarize a page. Failures are returned as text, never as an error status.
async fn preview_url(
    State(state): State<AppState>,
    Query(query): Query<PreviewQuery>,
) -> Json<PreviewResponse> {
    let url = query.url.unwrap_or_default();

    let result = match state.preview.preview(&url).await {
        Ok(summary) => summary,
        Err(e) => {
            tracing::warn!("Preview failed for {}: {}", url, e);
            format!("{} {}", constants::ERROR_PREFIX, e)
        }
    };

    Json(PreviewResponse { result })
}
