//! HTTP client for the Naksiter API

use anyhow::{Context, Result};
use naksiter_common::{
    constants, CheckResponse, LogsResponse, PreviewResponse, ReportRequest, ReportResponse,
};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Client for a running Naksiter server
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    client: Client,
}

impl ApiClient {
    /// Create a new API client
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("naksiter-cli/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Classify a URL
    pub async fn check(&self, url: &str, detail: bool) -> Result<CheckResponse> {
        let mut query = vec![("url", url.to_string())];
        if detail {
            query.push((constants::DETAIL_PARAM, "true".to_string()));
        }

        let response = self
            .client
            .get(format!("{}/check", self.base_url))
            .query(&query)
            .send()
            .await
            .context("Failed to reach the server")?;

        if !response.status().is_success() {
            anyhow::bail!("Check failed: {}", response.status());
        }

        response.json().await.context("Failed to parse check response")
    }

    /// Summarize a page
    pub async fn preview(&self, url: &str) -> Result<PreviewResponse> {
        let response = self
            .client
            .get(format!("{}/preview", self.base_url))
            .query(&[("url", url)])
            .send()
            .await
            .context("Failed to reach the server")?;

        if !response.status().is_success() {
            anyhow::bail!("Preview failed: {}", response.status());
        }

        response.json().await.context("Failed to parse preview response")
    }

    /// Submit an abuse report. Rate limited and invalid reports still carry
    /// a message, so the status is returned alongside it.
    pub async fn report(&self, url: &str) -> Result<(StatusCode, ReportResponse)> {
        let request = ReportRequest {
            url: Some(url.to_string()),
        };

        let response = self
            .client
            .post(format!("{}/report", self.base_url))
            .json(&request)
            .send()
            .await
            .context("Failed to reach the server")?;

        let status = response.status();
        let body: ReportResponse = response
            .json()
            .await
            .context("Failed to parse report response")?;

        Ok((status, body))
    }

    /// Recent report history
    pub async fn logs(&self) -> Result<LogsResponse> {
        let response = self
            .client
            .get(format!("{}/logs", self.base_url))
            .send()
            .await
            .context("Failed to reach the server")?;

        if !response.status().is_success() {
            anyhow::bail!("Fetching logs failed: {}", response.status());
        }

        response.json().await.context("Failed to parse logs response")
    }
}
