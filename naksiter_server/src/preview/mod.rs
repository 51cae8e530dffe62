//! Page preview: fetch a URL, extract its visible text and summarize it
//!
//! Every failure is returned as a `PreviewError`, which the route turns into
//! a result string. Nothing here can fail a request.

pub mod extract;
pub mod summarize;

pub use summarize::Summarizer;

use crate::reputation::verdict::{normalize_url, CheckError};
use std::time::Duration;
use thiserror::Error;

/// Markup read from a page before extraction stops
const MAX_PAGE_BYTES: usize = 2 * 1024 * 1024;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("URL이 필요합니다.")]
    MissingUrl,

    #[error("잘못된 URL 형식입니다.")]
    Malformed,

    #[error("요약 기능이 설정되지 않았습니다.")]
    NotConfigured,

    #[error("페이지를 불러올 수 없습니다: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("페이지가 HTTP {0} 응답을 반환했습니다.")]
    Status(u16),

    #[error("페이지에서 텍스트를 찾을 수 없습니다.")]
    NoText,

    #[error("요약 서비스 오류: {0}")]
    Summarizer(String),
}

impl From<CheckError> for PreviewError {
    fn from(e: CheckError) -> Self {
        match e {
            CheckError::MissingUrl => PreviewError::MissingUrl,
            CheckError::Malformed(_) => PreviewError::Malformed,
        }
    }
}

/// Fetches pages and hands their text to the summarizer
pub struct PreviewService {
    client: reqwest::Client,
    summarizer: Option<Summarizer>,
}

impl PreviewService {
    pub fn new(summarizer: Option<Summarizer>, fetch_timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(fetch_timeout)
            .user_agent(concat!("naksiter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, summarizer })
    }

    pub fn summarizer_enabled(&self) -> bool {
        self.summarizer.is_some()
    }

    /// Summary of the page at `raw_url`
    pub async fn preview(&self, raw_url: &str) -> Result<String, PreviewError> {
        let candidate = normalize_url(raw_url)?;
        let summarizer = self.summarizer.as_ref().ok_or(PreviewError::NotConfigured)?;

        let html = self.fetch(&candidate.url).await?;
        let text = extract::visible_text(&html, extract::MAX_TEXT_CHARS);
        if text.is_empty() {
            return Err(PreviewError::NoText);
        }

        tracing::debug!("Summarizing {} ({} chars)", candidate.url, text.chars().count());
        summarizer.summarize(&candidate.url, &text).await
    }

    /// Page markup, truncated at `MAX_PAGE_BYTES`
    async fn fetch(&self, url: &str) -> Result<String, PreviewError> {
        let mut response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Status(status.as_u16()));
        }

        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            let room = MAX_PAGE_BYTES - body.len();
            if chunk.len() >= room {
                body.extend_from_slice(&chunk[..room]);
                break;
            }
            body.extend_from_slice(&chunk);
        }

        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(summarizer: Option<Summarizer>) -> PreviewService {
        PreviewService::new(summarizer, Duration::from_millis(500)).unwrap()
    }

    #[tokio::test]
    async fn test_missing_url() {
        let err = service(None).preview(" ").await.unwrap_err();
        assert!(matches!(err, PreviewError::MissingUrl));
    }

    #[tokio::test]
    async fn test_not_configured_without_key() {
        let err = service(None).preview("https://example.com").await.unwrap_err();
        assert!(matches!(err, PreviewError::NotConfigured));
        assert_eq!(err.to_string(), "요약 기능이 설정되지 않았습니다.");
    }

    #[tokio::test]
    async fn test_fetch_failure_is_error_not_panic() {
        let summarizer =
            Summarizer::new("key".into(), "model".into(), "http://127.0.0.1:1/v1".into()).unwrap();
        let err = service(Some(summarizer))
            .preview("http://127.0.0.1:1/")
            .await
            .unwrap_err();
        assert!(matches!(err, PreviewError::Fetch(_)));
    }
}
