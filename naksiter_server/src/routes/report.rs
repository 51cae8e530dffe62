//! Abuse report routes (submit and public history)

use crate::abuse::SubmitOutcome;
use crate::routes::AppState;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use naksiter_common::{constants, LogsResponse, ReportRequest, ReportResponse};
use std::net::SocketAddr;

/// Build the report router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/report", post(submit_report))
        .route("/logs", get(report_logs))
}

/// Submitter identity: the peer address, or the first X-Forwarded-For hop
/// when the server is configured to sit behind a proxy
fn submitter_id(state: &AppState, headers: &HeaderMap, peer: SocketAddr) -> String {
    if state.config.trust_forwarded_for {
        let forwarded = headers
            .get("X-Forwarded-For")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        if let Some(ip) = forwarded {
            return ip.to_string();
        }
    }
    peer.ip().to_string()
}

fn message(status: StatusCode, text: &str) -> Response {
    (
        status,
        Json(ReportResponse {
            message: text.to_string(),
        }),
    )
        .into_response()
}

/// Submit an abuse report
async fn submit_report(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Result<Json<ReportRequest>, JsonRejection>,
) -> Response {
    let url = match body {
        Ok(Json(req)) => req.url.unwrap_or_default(),
        Err(e) => {
            tracing::debug!("Invalid report body: {}", e);
            String::new()
        }
    };
    let submitter = submitter_id(&state, &headers, peer);

    match state.ledger.submit(&url, &submitter, Utc::now()).await {
        SubmitOutcome::Accepted => message(StatusCode::OK, constants::REPORT_ACCEPTED),
        SubmitOutcome::RateLimited(limit) => {
            let mut response = message(StatusCode::TOO_MANY_REQUESTS, constants::REPORT_RATE_LIMITED);
            for (name, value) in limit.headers() {
                if let (Ok(name), Ok(value)) =
                    (HeaderName::try_from(name), HeaderValue::try_from(value))
                {
                    response.headers_mut().insert(name, value);
                }
            }
            response
        }
        SubmitOutcome::InvalidRequest => message(StatusCode::BAD_REQUEST, constants::REPORT_INVALID),
    }
}

/// Recent report history
async fn report_logs(State(state): State<AppState>) -> Json<LogsResponse> {
    let history = state.ledger.recent_log(state.config.report_log_limit).await;
    Json(LogsResponse { history })
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::routes::test_support::*;
    use crate::routes::AppState;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use naksiter_common::constants;
    use std::time::Duration;

    fn post_report(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/report")
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_report_then_rate_limited() {
        let state = test_state();

        let (status, json) = send(
            app_from(state.clone(), [10, 0, 0, 1]),
            post_report(r#"{"url":"http://scam.example"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["message"], constants::REPORT_ACCEPTED);

        let response = tower::ServiceExt::oneshot(
            app_from(state.clone(), [10, 0, 0, 1]),
            post_report(r#"{"url":"http://scam.example"}"#),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key("Retry-After"));

        assert_eq!(state.ledger.count_for("http://scam.example").await, 1);
    }

    #[tokio::test]
    async fn test_invalid_reports() {
        let state = test_state();

        for body in [r#"{}"#, r#"{"url":""}"#, "not json"] {
            let (status, json) = send(app_from(state.clone(), [10, 0, 0, 2]), post_report(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(json["message"], constants::REPORT_INVALID);
        }
        assert_eq!(state.ledger.len().await, 0);
    }

    #[tokio::test]
    async fn test_three_reporters_then_logs() {
        let state = test_state();

        for last in 1..=3u8 {
            let (status, _) = send(
                app_from(state.clone(), [10, 0, 0, last]),
                post_report(r#"{"url":"http://scam.example"}"#),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, json) = send(app_from(state.clone(), [10, 0, 0, 9]), get("/logs")).await;
        assert_eq!(status, StatusCode::OK);

        let history = json["신고내역"].as_array().unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0]["ip"], "10.0.0.1");
        assert_eq!(history[2]["ip"], "10.0.0.3");
        assert_eq!(history[0]["url"], "http://scam.example");
    }

    #[tokio::test]
    async fn test_forwarded_for_identity() {
        let config = Config {
            probe_timeout: Duration::from_millis(500),
            trust_forwarded_for: true,
            ..Config::default()
        };
        let state = AppState::new(config).unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/report")
            .header("Content-Type", "application/json")
            .header("X-Forwarded-For", "203.0.113.7, 10.0.0.1")
            .body(Body::from(r#"{"url":"http://scam.example"}"#))
            .unwrap();
        let (status, _) = send(app_from(state.clone(), [10, 0, 0, 1]), request).await;
        assert_eq!(status, StatusCode::OK);

        let log = state.ledger.recent_log(10).await;
        assert_eq!(log[0].ip, "203.0.113.7");
    }
}
