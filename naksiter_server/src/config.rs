//! Server configuration loaded from environment variables

use naksiter_common::constants;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Trusted domains used when `TRUSTED_DOMAINS` is not set
pub const DEFAULT_TRUSTED_DOMAINS: &[&str] =
    &["naver.com", "google.com", "daum.net", "kakao.com", "youtube.com"];

#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,

    /// Public port for HTTP traffic
    pub port: u16,

    /// Hard timeout for the reachability probe
    pub probe_timeout: Duration,

    /// Trusted registrable domains (e.g., "naver.com")
    pub trusted_domains: Vec<String>,

    /// Minimum gap between two accepted reports from one submitter
    pub report_cooldown: Duration,

    /// Entries returned by `/logs`
    pub report_log_limit: usize,

    /// Retention cap on stored reports
    pub max_stored_reports: usize,

    /// Use X-Forwarded-For as submitter identity (behind a reverse proxy)
    pub trust_forwarded_for: bool,

    /// OpenAI API key (optional, /preview degrades without it)
    pub openai_api_key: Option<String>,

    /// Chat model used for page summaries
    pub openai_model: String,

    /// OpenAI-compatible API base URL
    pub openai_base_url: String,

    /// Directory with the front-end page (optional)
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| constants::DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            probe_timeout: Duration::from_millis(parse_var("PROBE_TIMEOUT_MS", 3000)?),
            trusted_domains: match env::var("TRUSTED_DOMAINS") {
                Ok(list) => parse_domain_list(&list),
                Err(_) => DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            },
            report_cooldown: Duration::from_secs(parse_var("REPORT_COOLDOWN_SECS", 60)?),
            report_log_limit: parse_var("REPORT_LOG_LIMIT", constants::LOG_LIMIT as u64)? as usize,
            max_stored_reports: parse_var("MAX_STORED_REPORTS", 10_000)? as usize,
            trust_forwarded_for: env::var("TRUST_FORWARDED_FOR")
                .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
            openai_api_key: env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        })
    }

    /// Whether /preview can reach a summarizer at all
    pub fn summarizer_enabled(&self) -> bool {
        self.openai_api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: constants::DEFAULT_PORT,
            probe_timeout: Duration::from_millis(3000),
            trusted_domains: DEFAULT_TRUSTED_DOMAINS.iter().map(|d| d.to_string()).collect(),
            report_cooldown: Duration::from_secs(60),
            report_log_limit: constants::LOG_LIMIT,
            max_stored_reports: 10_000,
            trust_forwarded_for: false,
            openai_api_key: None,
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_base_url: "https://api.openai.com/v1".to_string(),
            static_dir: None,
        }
    }
}

/// Parse a comma separated domain list, dropping blanks
fn parse_domain_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_var(name: &'static str, default: u64) -> Result<u64, ConfigError> {
    match env::var(name) {
        Ok(value) => value.trim().parse().map_err(|_| ConfigError::InvalidNumber(name)),
        Err(_) => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid numeric value for environment variable: {0}")]
    InvalidNumber(&'static str),
}
