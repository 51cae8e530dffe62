//! In-memory abuse report ledger
//!
//! Reports, per-URL counts and submitter cooldowns live behind one lock so a
//! submission is applied as a single unit. Nothing survives a restart.

use super::rate_limit::{RateLimitConfig, RateLimitResult, SubmitterCooldown};
use crate::reputation::verdict::with_scheme;
use chrono::{DateTime, Local, Utc};
use naksiter_common::ReportLogEntry;
use std::collections::{HashMap, VecDeque};
use tokio::sync::RwLock;

/// Default retention cap on stored reports
pub const DEFAULT_MAX_REPORTS: usize = 10_000;

/// A user-submitted claim that a URL is abusive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub url: String,
    pub submitter: String,
    pub timestamp: DateTime<Utc>,
}

impl Report {
    /// Public history row, time rendered in local time
    pub fn to_log_entry(&self) -> ReportLogEntry {
        ReportLogEntry {
            url: self.url.clone(),
            ip: self.submitter.clone(),
            time: self
                .timestamp
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
        }
    }
}

/// Outcome of a report submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    RateLimited(RateLimitResult),
    InvalidRequest,
}

/// Ledger limits
#[derive(Debug, Clone)]
pub struct LedgerConfig {
    pub rate_limit: RateLimitConfig,
    /// Oldest reports are dropped past this many; counts are kept
    pub max_reports: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rate_limit: super::rate_limit::limits::report_submission(),
            max_reports: DEFAULT_MAX_REPORTS,
        }
    }
}

#[derive(Debug, Default)]
struct LedgerState {
    reports: VecDeque<Report>,
    counts: HashMap<String, u64>,
    cooldown: SubmitterCooldown,
}

/// Store for abuse reports with per-submitter rate limiting
pub struct ReportLedger {
    state: RwLock<LedgerState>,
    config: LedgerConfig,
}

impl ReportLedger {
    pub fn new(config: LedgerConfig) -> Self {
        Self {
            state: RwLock::new(LedgerState::default()),
            config,
        }
    }

    /// Submit a report for `url` from `submitter` at `now`
    pub async fn submit(&self, url: &str, submitter: &str, now: DateTime<Utc>) -> SubmitOutcome {
        let url = url.trim();
        if url.is_empty() {
            return SubmitOutcome::InvalidRequest;
        }

        let mut state = self.state.write().await;

        let check = state.cooldown.check(submitter, now, &self.config.rate_limit);
        if !check.allowed {
            tracing::debug!("Report from {} rate limited ({}s left)", submitter, check.retry_after_secs);
            return SubmitOutcome::RateLimited(check);
        }

        // Keep the cooldown map bounded to submitters still inside their window
        state.cooldown.prune(now, &self.config.rate_limit);
        state.cooldown.record(submitter, now);

        *state.counts.entry(with_scheme(url)).or_insert(0) += 1;

        if state.reports.len() >= self.config.max_reports {
            state.reports.pop_front();
        }
        state.reports.push_back(Report {
            url: url.to_string(),
            submitter: submitter.to_string(),
            timestamp: now,
        });

        tracing::info!("Report accepted for {} from {}", url, submitter);
        SubmitOutcome::Accepted
    }

    /// Reports ever received for this URL, with `https://` assumed when no
    /// scheme is given. Otherwise the string must match exactly.
    pub async fn count_for(&self, url: &str) -> u64 {
        self.state
            .read()
            .await
            .counts
            .get(&with_scheme(url))
            .copied()
            .unwrap_or(0)
    }

    /// The last `limit` reports, oldest of the tail first
    pub async fn recent(&self, limit: usize) -> Vec<Report> {
        let state = self.state.read().await;
        let skip = state.reports.len().saturating_sub(limit);
        state.reports.iter().skip(skip).cloned().collect()
    }

    /// The last `limit` reports rendered for the public history
    pub async fn recent_log(&self, limit: usize) -> Vec<ReportLogEntry> {
        self.recent(limit)
            .await
            .iter()
            .map(Report::to_log_entry)
            .collect()
    }

    /// Number of reports currently retained
    pub async fn len(&self) -> usize {
        self.state.read().await.reports.len()
    }
}

impl Default for ReportLedger {
    fn default() -> Self {
        Self::new(LedgerConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::sync::Arc;

    fn t0() -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000, 0).unwrap()
    }

    #[tokio::test]
    async fn test_three_submitters_count() {
        let ledger = ReportLedger::default();
        let now = t0();

        for (i, ip) in ["10.0.0.1", "10.0.0.2", "10.0.0.3"].iter().enumerate() {
            let at = now + Duration::seconds(i as i64 * 10);
            assert_eq!(ledger.submit("http://scam.example", ip, at).await, SubmitOutcome::Accepted);
        }

        assert_eq!(ledger.count_for("http://scam.example").await, 3);
        assert_eq!(ledger.count_for("http://scam.example/").await, 0);
        assert_eq!(ledger.count_for("http://other.example").await, 0);
    }

    #[tokio::test]
    async fn test_schemeless_report_shares_key() {
        let ledger = ReportLedger::default();
        let now = t0();

        ledger.submit("scam.example", "10.0.0.1", now).await;
        ledger.submit("https://scam.example", "10.0.0.2", now).await;

        assert_eq!(ledger.count_for("scam.example").await, 2);
        assert_eq!(ledger.count_for("https://scam.example").await, 2);
        assert_eq!(ledger.count_for("http://scam.example").await, 0);

        // history shows the URL as submitted
        assert_eq!(ledger.recent(10).await[0].url, "scam.example");
    }

    #[tokio::test]
    async fn test_same_submitter_rate_limited() {
        let ledger = ReportLedger::default();
        let now = t0();

        assert_eq!(ledger.submit("http://scam.example", "10.0.0.1", now).await, SubmitOutcome::Accepted);
        let second = ledger
            .submit("http://other.example", "10.0.0.1", now + Duration::seconds(30))
            .await;
        assert_eq!(
            second,
            SubmitOutcome::RateLimited(RateLimitResult {
                allowed: false,
                retry_after_secs: 30,
            })
        );

        // rejected attempt left nothing behind
        assert_eq!(ledger.count_for("http://scam.example").await, 1);
        assert_eq!(ledger.count_for("http://other.example").await, 0);
        assert_eq!(ledger.len().await, 1);

        // the window runs from the accepted report, not the rejected one
        let third = ledger
            .submit("http://other.example", "10.0.0.1", now + Duration::seconds(60))
            .await;
        assert_eq!(third, SubmitOutcome::Accepted);
    }

    #[tokio::test]
    async fn test_empty_url_is_invalid() {
        let ledger = ReportLedger::default();
        let now = t0();

        assert_eq!(ledger.submit("", "10.0.0.1", now).await, SubmitOutcome::InvalidRequest);
        assert_eq!(ledger.submit("   ", "10.0.0.1", now).await, SubmitOutcome::InvalidRequest);

        // invalid attempts do not start a cooldown
        assert_eq!(ledger.submit("http://scam.example", "10.0.0.1", now).await, SubmitOutcome::Accepted);
        assert_eq!(ledger.len().await, 1);
    }

    #[tokio::test]
    async fn test_recent_log_tail_in_order() {
        let ledger = ReportLedger::default();
        let now = t0();

        for i in 0..15 {
            let url = format!("http://scam{}.example", i);
            let ip = format!("10.0.0.{}", i);
            ledger.submit(&url, &ip, now + Duration::seconds(i)).await;
        }

        let log = ledger.recent(10).await;
        assert_eq!(log.len(), 10);
        assert_eq!(log.first().unwrap().url, "http://scam5.example");
        assert_eq!(log.last().unwrap().url, "http://scam14.example");
        assert!(log.windows(2).all(|w| w[0].timestamp <= w[1].timestamp));

        assert_eq!(ledger.recent(100).await.len(), 15);
    }

    #[tokio::test]
    async fn test_log_entry_time_format() {
        let ledger = ReportLedger::default();
        ledger.submit("http://scam.example", "10.0.0.1", t0()).await;

        let entries = ledger.recent_log(10).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].ip, "10.0.0.1");
        assert_eq!(entries[0].time.len(), "YYYY-MM-DD HH:MM:SS".len());
        assert_eq!(&entries[0].time[4..5], "-");
        assert_eq!(&entries[0].time[13..14], ":");
    }

    #[tokio::test]
    async fn test_retention_cap_keeps_counts() {
        let ledger = ReportLedger::new(LedgerConfig {
            max_reports: 3,
            ..LedgerConfig::default()
        });
        let now = t0();

        for i in 0..5 {
            let ip = format!("10.0.0.{}", i);
            ledger.submit("http://scam.example", &ip, now).await;
        }

        assert_eq!(ledger.len().await, 3);
        assert_eq!(ledger.count_for("http://scam.example").await, 5);
        assert_eq!(ledger.recent(10).await[0].submitter, "10.0.0.2");
    }

    #[tokio::test]
    async fn test_concurrent_submissions_one_per_submitter() {
        let ledger = Arc::new(ReportLedger::default());
        let now = t0();

        let mut handles = Vec::new();
        for i in 0..20 {
            let ledger = ledger.clone();
            handles.push(tokio::spawn(async move {
                // four submitters, five attempts each
                let ip = format!("10.0.0.{}", i % 4);
                ledger.submit("http://scam.example", &ip, now).await
            }));
        }

        let mut accepted = 0;
        for handle in handles {
            if handle.await.unwrap() == SubmitOutcome::Accepted {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 4);
        assert_eq!(ledger.count_for("http://scam.example").await, 4);
        assert_eq!(ledger.len().await, 4);
    }
}
