//! Trusted domain index for exact and look-alike host checks

use super::similarity::similarity;

/// Ratio above which an untrusted host counts as a look-alike
pub const LOOKALIKE_THRESHOLD: f64 = 0.85;

/// Ordered set of trusted registrable domains
#[derive(Debug, Clone, Default)]
pub struct TrustIndex {
    domains: Vec<String>,
}

impl TrustIndex {
    /// Build an index, canonicalizing and de-duplicating entries in order
    pub fn new<I, S>(domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut canonical: Vec<String> = Vec::new();
        for domain in domains {
            if let Some(entry) = canonicalize(domain.as_ref()) {
                if !canonical.contains(&entry) {
                    canonical.push(entry);
                }
            }
        }
        Self { domains: canonical }
    }

    /// Number of trusted entries
    pub fn len(&self) -> usize {
        self.domains.len()
    }

    /// Host equals an entry, or `www.` + an entry
    pub fn is_trusted(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        let bare = host.strip_prefix("www.").unwrap_or(&host);

        self.domains.iter().any(|d| *d == host || d == bare)
    }

    /// Untrusted host that reads almost like a trusted entry
    pub fn is_suspicious_similar(&self, host: &str) -> bool {
        self.closest_lookalike(host).is_some()
    }

    /// The trusted entry a look-alike host imitates, with its ratio
    pub fn closest_lookalike(&self, host: &str) -> Option<(&str, f64)> {
        if self.is_trusted(host) {
            return None;
        }

        let host = host.to_lowercase();
        self.domains
            .iter()
            .map(|d| (d.as_str(), similarity(&host, d)))
            .filter(|(_, ratio)| *ratio > LOOKALIKE_THRESHOLD)
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

/// Lower-case, no scheme, no path or trailing slash
fn canonicalize(domain: &str) -> Option<String> {
    let domain = domain.trim().to_lowercase();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(&domain);
    let domain = domain.split('/').next().unwrap_or_default().trim_end_matches('.');

    if domain.is_empty() {
        None
    } else {
        Some(domain.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> TrustIndex {
        TrustIndex::new(["naver.com", "google.com", "daum.net", "kakao.com", "youtube.com"])
    }

    #[test]
    fn test_canonical_entries() {
        let index = TrustIndex::new(["HTTPS://Naver.com/", "naver.com", " ", "daum.net"]);
        assert_eq!(index.domains, ["naver.com".to_string(), "daum.net".to_string()]);
    }

    #[test]
    fn test_exact_and_www() {
        let index = index();
        assert!(index.is_trusted("naver.com"));
        assert!(index.is_trusted("NAVER.COM"));
        assert!(index.is_trusted("www.naver.com"));
        assert!(!index.is_trusted("m.naver.com"));
        assert!(!index.is_trusted("naver.com.evil.io"));
        assert!(!index.is_trusted("www.www.naver.com"));
    }

    #[test]
    fn test_lookalikes() {
        let index = index();
        assert!(index.is_suspicious_similar("naverr.com"));
        assert!(index.is_suspicious_similar("gooogle.com"));
        assert!(index.is_suspicious_similar("kakao.co"));
        assert_eq!(index.closest_lookalike("daun.net").map(|(d, _)| d), Some("daum.net"));
    }

    #[test]
    fn test_not_lookalikes() {
        let index = index();
        // trusted hosts are never look-alikes of themselves
        assert!(!index.is_suspicious_similar("naver.com"));
        assert!(!index.is_suspicious_similar("www.google.com"));
        assert!(!index.is_suspicious_similar("naver-login.com"));
        assert!(!index.is_suspicious_similar("example.org"));
    }

    #[test]
    fn test_www_kept_in_lookalike_comparison() {
        let index = index();
        // "www." stays on the candidate, which pulls the ratio under the threshold
        assert!(similarity("www.naverr.com", "naver.com") <= LOOKALIKE_THRESHOLD);
        assert!(!index.is_suspicious_similar("www.naverr.com"));
        assert!(index.is_suspicious_similar("naverr.com"));
    }
}
