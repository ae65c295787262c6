//! HEAD-request implementation of [`ReachabilityProbe`].

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::reachability::{ProbeError, ReachabilityProbe};

/// Probes URLs with a single `HEAD` request.
///
/// Redirects are followed, so the reported status is the one of the final hop.
pub struct HttpReachabilityProbe {
    client: reqwest::Client,
}

impl HttpReachabilityProbe {
    /// Builds a probe whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("veritas-reachability/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// Wraps a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ReachabilityProbe for HttpReachabilityProbe {
    async fn probe(&self, url: &str) -> Result<u16, ProbeError> {
        let response = self.client.head(url).send().await.map_err(|e| {
            if e.is_timeout() {
                ProbeError::Timeout
            } else {
                ProbeError::Request(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        debug!(url, status, "Reachability probe answered");
        Ok(status)
    }
}
