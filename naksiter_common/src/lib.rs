//! Naksiter Common - Shared API types for the URL reputation service
//!
//! This crate contains the verdict enumeration and the JSON request/response
//! bodies used by both the server and the CLI.

use serde::{Deserialize, Serialize};

/// Why a URL was judged normal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NormalBasis {
    /// Host is in the trusted domain set and answered the probe
    TrustedDomain,
    /// No heuristic, report or reachability signal fired
    AssumedSafe,
}

/// Classification outcome for a URL
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Normal(NormalBasis),
    Warning,
    DangerHighRisk,
    DangerLookalike,
    CautionUnreachableTrusted,
    CautionReported,
    WarningUnreachable,
    Malformed,
}

impl Verdict {
    /// Short bracketed tag shown in front of the message
    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Normal(_) => constants::LABEL_NORMAL,
            Verdict::Warning | Verdict::WarningUnreachable => constants::LABEL_WARNING,
            Verdict::DangerHighRisk | Verdict::DangerLookalike => constants::LABEL_DANGER,
            Verdict::CautionUnreachableTrusted | Verdict::CautionReported | Verdict::Malformed => {
                constants::LABEL_CAUTION
            }
        }
    }

    /// Human readable explanation
    pub fn message(&self) -> &'static str {
        match self {
            Verdict::Normal(NormalBasis::TrustedDomain) => "신뢰된 도메인입니다.",
            Verdict::Normal(NormalBasis::AssumedSafe) => "특별한 위험 요소가 발견되지 않았습니다.",
            Verdict::Warning => "피싱 가능성이 있는 URL입니다.",
            Verdict::DangerHighRisk => "피싱 위험 키워드가 다수 포함된 URL입니다.",
            Verdict::DangerLookalike => "신뢰된 도메인을 흉내 낸 유사 도메인입니다.",
            Verdict::CautionUnreachableTrusted => "신뢰된 도메인이지만 현재 접속할 수 없습니다.",
            Verdict::CautionReported => "여러 사용자가 신고한 URL입니다.",
            Verdict::WarningUnreachable => "접속할 수 없는 사이트입니다.",
            Verdict::Malformed => "잘못된 URL 형식입니다.",
        }
    }

    /// Full result line, e.g. "[정상] 신뢰된 도메인입니다."
    pub fn result_text(&self) -> String {
        format!("[{}] {}", self.label(), self.message())
    }

    /// Whether the verdict should be shown as a danger to the user
    pub fn is_danger(&self) -> bool {
        matches!(self, Verdict::DangerHighRisk | Verdict::DangerLookalike)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.result_text())
    }
}

/// Raw signals behind a verdict (returned with `detail=true`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signals {
    pub host: String,
    pub score: usize,
    pub trusted: bool,
    pub lookalike: bool,
    pub reachable: bool,
}

/// Response body for `GET /check`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResponse {
    /// Label and message, or an `[오류]` line on failure
    pub result: String,

    /// Accumulated report count for the exact URL
    #[serde(rename = "신고수")]
    pub report_count: u64,

    /// Signal breakdown, only present when requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signals: Option<Signals>,
}

impl CheckResponse {
    pub fn from_verdict(verdict: Verdict, report_count: u64) -> Self {
        Self {
            result: verdict.result_text(),
            report_count,
            signals: None,
        }
    }

    /// Failure response: still a normal body, never a 5xx
    pub fn error(detail: impl std::fmt::Display) -> Self {
        Self {
            result: format!("{} {}", constants::ERROR_PREFIX, detail),
            report_count: 0,
            signals: None,
        }
    }
}

/// Response body for `GET /preview`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewResponse {
    pub result: String,
}

/// Request body for `POST /report`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportRequest {
    #[serde(default)]
    pub url: Option<String>,
}

/// Response body for `POST /report`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResponse {
    pub message: String,
}

/// One row of the public report history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportLogEntry {
    pub url: String,
    pub ip: String,
    /// Local time, `YYYY-MM-DD HH:MM:SS`
    pub time: String,
}

/// Response body for `GET /logs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(rename = "신고내역")]
    pub history: Vec<ReportLogEntry>,
}

/// Response body for `GET /health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub reports: usize,
    pub trusted_domains: usize,
    pub summarizer: bool,
}

/// Constants shared by server and client
pub mod constants {
    /// Default listen port
    pub const DEFAULT_PORT: u16 = 10000;

    /// Prefix of result strings produced by internal failures
    pub const ERROR_PREFIX: &str = "[오류]";

    /// Verdict labels, shown in brackets at the start of a result
    pub const LABEL_NORMAL: &str = "정상";
    pub const LABEL_WARNING: &str = "경고";
    pub const LABEL_DANGER: &str = "위험";
    pub const LABEL_CAUTION: &str = "주의";

    /// Report accepted
    pub const REPORT_ACCEPTED: &str = "신고가 접수되었습니다.";

    /// Same submitter reported again inside the cooldown window
    pub const REPORT_RATE_LIMITED: &str = "신고는 1분에 한 번만 가능합니다. 잠시 후 다시 시도해주세요.";

    /// Report body had no usable URL
    pub const REPORT_INVALID: &str = "신고할 URL이 필요합니다.";

    /// Number of entries returned by `/logs`
    pub const LOG_LIMIT: usize = 10;

    /// Query flag that adds the signal breakdown to `/check`
    pub const DETAIL_PARAM: &str = "detail";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_result_text() {
        assert_eq!(
            Verdict::Normal(NormalBasis::TrustedDomain).result_text(),
            "[정상] 신뢰된 도메인입니다."
        );
        assert_eq!(Verdict::Warning.result_text(), "[경고] 피싱 가능성이 있는 URL입니다.");
        assert!(Verdict::Malformed.result_text().starts_with("[주의]"));
        assert!(Verdict::DangerLookalike.is_danger());
        assert!(!Verdict::CautionReported.is_danger());
    }

    #[test]
    fn test_check_response_field_names() {
        let resp = CheckResponse::from_verdict(Verdict::CautionReported, 3);
        let json = serde_json::to_string(&resp).unwrap();

        assert!(json.contains("\"신고수\":3"));
        assert!(!json.contains("signals"));

        let decoded: CheckResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.report_count, 3);
        assert_eq!(decoded.result, Verdict::CautionReported.result_text());
    }

    #[test]
    fn test_error_response() {
        let resp = CheckResponse::error("URL이 필요합니다.");
        assert!(resp.result.starts_with(constants::ERROR_PREFIX));
        assert_eq!(resp.report_count, 0);
    }

    #[test]
    fn test_logs_response_field_name() {
        let resp = LogsResponse {
            history: vec![ReportLogEntry {
                url: "http://scam.example".to_string(),
                ip: "10.0.0.1".to_string(),
                time: "2026-01-02 03:04:05".to_string(),
            }],
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"신고내역\""));
        assert!(json.contains("\"time\":\"2026-01-02 03:04:05\""));
    }

    #[test]
    fn test_report_request_missing_url() {
        let req: ReportRequest = serde_json::from_str("{}").unwrap();
        assert!(req.url.is_none());
    }
}
