//! Abuse report handling
//!
//! Provides:
//! - The in-memory report ledger (reports, per-URL counts, recent history)
//! - Per-submitter rate limiting of report submissions

pub mod ledger;
pub mod rate_limit;

pub use ledger::{LedgerConfig, ReportLedger, SubmitOutcome};
pub use rate_limit::RateLimitConfig;
