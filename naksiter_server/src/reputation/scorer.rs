//! Keyword-density risk score computed from the URL text alone

/// Words phishing URLs lean on to look like account flows
pub const RISK_KEYWORDS: &[&str] = &["login", "secure", "verify", "account", "update", "confirm"];

/// Score at or above which a URL is high risk
pub const HIGH_RISK_SCORE: usize = 3;

/// Number of distinct keywords found anywhere in the URL (case-insensitive)
pub fn score(url: &str) -> usize {
    matched_keywords(url).len()
}

/// The keywords that fired, in list order
pub fn matched_keywords(url: &str) -> Vec<&'static str> {
    let url = url.to_lowercase();
    RISK_KEYWORDS
        .iter()
        .copied()
        .filter(|keyword| url.contains(keyword))
        .collect()
}
