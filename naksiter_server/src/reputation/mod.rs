//! URL reputation engine
//!
//! Provides:
//! - Trusted domain index with look-alike detection
//! - Keyword risk scoring over the URL text
//! - The verdict engine that ranks all signals into one label

pub mod scorer;
pub mod similarity;
pub mod trust;
pub mod verdict;

pub use trust::TrustIndex;
pub use verdict::VerdictEngine;
