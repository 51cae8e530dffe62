//! Page summaries through an OpenAI-compatible chat completion API

use super::PreviewError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const SYSTEM_PROMPT: &str = "당신은 피싱 사이트를 분석하는 보안 도우미입니다. \
주어진 웹페이지 텍스트를 한국어로 세 문장 이내로 요약하고, \
로그인 정보나 결제 정보를 요구하는 등 피싱으로 의심되는 요소가 있으면 함께 알려주세요.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

/// Client for the summarization collaborator
#[derive(Clone)]
pub struct Summarizer {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl Summarizer {
    pub fn new(api_key: String, model: String, base_url: String) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()?;

        Ok(Self {
            client,
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Summarize extracted page text for `url`
    pub async fn summarize(&self, url: &str, text: &str) -> Result<String, PreviewError> {
        let prompt = format!("URL: {}\n\n페이지 내용:\n{}", url, text);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            max_tokens: 400,
            temperature: 0.3,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PreviewError::Summarizer(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Summarizer returned {}: {}", status, body);
            return Err(PreviewError::Summarizer(format!("HTTP {}", status.as_u16())));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| PreviewError::Summarizer(e.to_string()))?;

        parse_reply(chat)
    }
}

fn parse_reply(chat: ChatResponse) -> Result<String, PreviewError> {
    chat.choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| PreviewError::Summarizer("빈 응답".to_string()))
}
