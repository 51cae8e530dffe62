//! Reachability probing of candidate URLs

use std::future::Future;
use std::time::Duration;

/// Redirect hops followed before a probe counts as a loop
const MAX_REDIRECTS: usize = 10;

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

impl Reachability {
    pub fn is_reachable(&self) -> bool {
        matches!(self, Reachability::Reachable)
    }

    /// Reachable iff the server answered with a status below 500
    pub fn from_status(status: u16) -> Self {
        if status < 500 {
            Reachability::Reachable
        } else {
            Reachability::Unreachable
        }
    }
}

/// Anything that can tell whether a URL answers.
///
/// Implementations must resolve within their own timeout and never fail:
/// every error is `Unreachable`.
pub trait Probe: Send + Sync {
    fn probe(&self, url: &str) -> impl Future<Output = Reachability> + Send;
}

/// Probe that issues a single GET with a hard timeout
#[derive(Clone)]
pub struct HttpProber {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpProber {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!("naksiter/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, timeout })
    }
}

impl Probe for HttpProber {
    async fn probe(&self, url: &str) -> Reachability {
        // The client timeout covers the request; this bounds DNS and connect stalls too
        match tokio::time::timeout(self.timeout, self.client.get(url).send()).await {
            Ok(Ok(response)) => {
                let status = response.status().as_u16();
                tracing::debug!("Probe {} -> {}", url, status);
                Reachability::from_status(status)
            }
            Ok(Err(e)) => {
                tracing::debug!("Probe {} failed: {}", url, e);
                Reachability::Unreachable
            }
            Err(_) => {
                tracing::debug!("Probe {} timed out after {:?}", url, self.timeout);
                Reachability::Unreachable
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status() {
        assert_eq!(Reachability::from_status(200), Reachability::Reachable);
        assert_eq!(Reachability::from_status(404), Reachability::Reachable);
        assert_eq!(Reachability::from_status(499), Reachability::Reachable);
        assert_eq!(Reachability::from_status(500), Reachability::Unreachable);
        assert_eq!(Reachability::from_status(503), Reachability::Unreachable);
    }

    #[tokio::test]
    async fn test_refused_connection_is_unreachable() {
        let prober = HttpProber::new(Duration::from_millis(500)).unwrap();
        let result = prober.probe("http://127.0.0.1:1/").await;
        assert_eq!(result, Reachability::Unreachable);
    }

    #[tokio::test]
    async fn test_invalid_url_is_unreachable() {
        let prober = HttpProber::new(Duration::from_millis(500)).unwrap();
        assert_eq!(prober.probe("not a url").await, Reachability::Unreachable);
    }
}
