//! Verdict engine: combines trust, keyword score, reachability and reports
//!
//! Precedence, first match wins:
//! 1. trusted and reachable        -> Normal (trusted domain)
//! 2. trusted and unreachable      -> CautionUnreachableTrusted
//! 3. look-alike of a trusted host -> DangerLookalike
//! 4. score >= 3                   -> DangerHighRisk
//! 5. score >= 1                   -> Warning
//! 6. reports >= 3                 -> CautionReported
//! 7. unreachable                  -> WarningUnreachable
//! 8. otherwise                    -> Normal (assumed safe)

use super::scorer::{self, HIGH_RISK_SCORE};
use super::trust::TrustIndex;
use crate::abuse::ReportLedger;
use crate::probe::Probe;
use naksiter_common::{NormalBasis, Signals, Verdict};
use std::sync::Arc;
use thiserror::Error;

/// Report count at which crowd reports start to matter
pub const REPORTED_THRESHOLD: u64 = 3;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("URL이 필요합니다.")]
    MissingUrl,

    #[error("URL에서 호스트를 찾을 수 없습니다: {0}")]
    Malformed(String),
}

/// A URL ready for classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Trimmed input with a scheme guaranteed. Case is kept as typed, so
    /// `HTTP://Scam.example` and `http://scam.example` are distinct report keys.
    pub url: String,
    /// Lower-cased network host
    pub host: String,
}

/// Trim and prefix `https://` when no http(s) scheme is present.
///
/// This is the key report counts are stored and looked up under.
pub fn with_scheme(raw: &str) -> String {
    let raw = raw.trim();
    let lower = raw.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw)
    }
}

/// Prefix `https://` when no http(s) scheme is present and extract the host
pub fn normalize_url(raw: &str) -> Result<Candidate, CheckError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CheckError::MissingUrl);
    }

    let url = with_scheme(raw);

    let parsed = url::Url::parse(&url).map_err(|_| CheckError::Malformed(raw.to_string()))?;
    let host = parsed
        .host_str()
        .filter(|h| !h.is_empty())
        .ok_or_else(|| CheckError::Malformed(raw.to_string()))?
        .to_lowercase();

    Ok(Candidate { url, host })
}

/// Inputs to the precedence rules
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evidence {
    pub trusted: bool,
    pub lookalike: bool,
    pub score: usize,
    pub reachable: bool,
    pub report_count: u64,
}

/// Apply the precedence rules. Total over every combination of evidence.
pub fn decide(evidence: &Evidence) -> Verdict {
    if evidence.trusted {
        return if evidence.reachable {
            Verdict::Normal(NormalBasis::TrustedDomain)
        } else {
            Verdict::CautionUnreachableTrusted
        };
    }
    if evidence.lookalike {
        return Verdict::DangerLookalike;
    }
    if evidence.score >= HIGH_RISK_SCORE {
        return Verdict::DangerHighRisk;
    }
    if evidence.score >= 1 {
        return Verdict::Warning;
    }
    if evidence.report_count >= REPORTED_THRESHOLD {
        return Verdict::CautionReported;
    }
    if !evidence.reachable {
        return Verdict::WarningUnreachable;
    }
    Verdict::Normal(NormalBasis::AssumedSafe)
}

/// Classification result for one URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub verdict: Verdict,
    pub report_count: u64,
    /// Absent for malformed input
    pub signals: Option<Signals>,
}

impl Classification {
    fn malformed() -> Self {
        Self {
            verdict: Verdict::Malformed,
            report_count: 0,
            signals: None,
        }
    }
}

/// Classifies URLs against a trust index, a prober and the report ledger
pub struct VerdictEngine<P> {
    trust: TrustIndex,
    prober: P,
    ledger: Arc<ReportLedger>,
}

impl<P: Probe> VerdictEngine<P> {
    pub fn new(trust: TrustIndex, prober: P, ledger: Arc<ReportLedger>) -> Self {
        Self {
            trust,
            prober,
            ledger,
        }
    }

    pub fn trust(&self) -> &TrustIndex {
        &self.trust
    }

    /// Classify a raw URL. Only a missing URL is an error; a URL without a
    /// host is the `Malformed` verdict.
    pub async fn classify(&self, raw: &str) -> Result<Classification, CheckError> {
        let candidate = match normalize_url(raw) {
            Ok(candidate) => candidate,
            Err(CheckError::Malformed(input)) => {
                tracing::debug!("Malformed URL: {}", input);
                return Ok(Classification::malformed());
            }
            Err(e) => return Err(e),
        };

        let trusted = self.trust.is_trusted(&candidate.host);
        let lookalike = self.trust.is_suspicious_similar(&candidate.host);
        let score = scorer::score(&candidate.url);
        let reachable = self.prober.probe(&candidate.url).await.is_reachable();
        let report_count = self.ledger.count_for(&candidate.url).await;

        let evidence = Evidence {
            trusted,
            lookalike,
            score,
            reachable,
            report_count,
        };
        let verdict = decide(&evidence);

        tracing::debug!(
            host = %candidate.host,
            score,
            trusted,
            lookalike,
            reachable,
            report_count,
            "Classified {} as {:?}",
            candidate.url,
            verdict
        );

        Ok(Classification {
            verdict,
            report_count,
            signals: Some(Signals {
                host: candidate.host,
                score,
                trusted,
                lookalike,
                reachable,
            }),
        })
    }
}
