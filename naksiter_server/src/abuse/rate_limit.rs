//! Per-submitter rate limiting for abuse reports
//!
//! Sliding cooldown: a submitter may have one accepted report per window,
//! measured from their last accepted report. Checking never mutates state;
//! callers record an attempt only once it is accepted.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::time::Duration;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Minimum gap between two accepted actions from one submitter
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(window_secs: u64) -> Self {
        Self {
            window: Duration::from_secs(window_secs),
        }
    }
}

/// Pre-configured rate limits
pub mod limits {
    use super::*;

    /// Abuse reports: one per minute per submitter
    pub fn report_submission() -> RateLimitConfig {
        RateLimitConfig::new(60)
    }
}

/// Result of a rate limit check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitResult {
    /// Whether the action is allowed
    pub allowed: bool,
    /// Seconds until the submitter may try again (0 when allowed)
    pub retry_after_secs: u64,
}

impl RateLimitResult {
    /// Create headers for a rate limited response
    pub fn headers(&self) -> Vec<(String, String)> {
        if self.allowed {
            return Vec::new();
        }
        vec![("Retry-After".to_string(), self.retry_after_secs.to_string())]
    }
}

/// Last accepted instant per submitter
#[derive(Debug, Default)]
pub struct SubmitterCooldown {
    last_accepted: HashMap<String, DateTime<Utc>>,
}

impl SubmitterCooldown {
    /// Check whether `submitter` may act at `now`, without recording anything
    pub fn check(&self, submitter: &str, now: DateTime<Utc>, config: &RateLimitConfig) -> RateLimitResult {
        let Some(last) = self.last_accepted.get(submitter) else {
            return RateLimitResult {
                allowed: true,
                retry_after_secs: 0,
            };
        };

        // A clock that moved backwards counts as no time elapsed
        let elapsed = (now - *last).to_std().unwrap_or(Duration::ZERO);
        if elapsed >= config.window {
            return RateLimitResult {
                allowed: true,
                retry_after_secs: 0,
            };
        }

        let remaining = config.window - elapsed;
        let retry_after_secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
        RateLimitResult {
            allowed: false,
            retry_after_secs,
        }
    }

    /// Record an accepted action
    pub fn record(&mut self, submitter: &str, now: DateTime<Utc>) {
        self.last_accepted.insert(submitter.to_string(), now);
    }

    /// Drop submitters whose window has fully elapsed
    pub fn prune(&mut self, now: DateTime<Utc>, config: &RateLimitConfig) {
        self.last_accepted.retain(|_, last| {
            (now - *last)
                .to_std()
                .map(|elapsed| elapsed < config.window)
                .unwrap_or(true)
        });
    }
}

#[cfg(test)]
impl SubmitterCooldown {
    fn last_accepted(&self, submitter: &str) -> Option<DateTime<Utc>> {
        self.last_accepted.get(submitter).copied()
    }

    fn len(&self) -> usize {
        self.last_accepted.len()
    }
}
