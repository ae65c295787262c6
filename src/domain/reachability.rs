//! Contract for checking whether an original URL answers.

use async_trait::async_trait;

/// Statuses below this value count as reachable.
pub const UNREACHABLE_STATUS_FLOOR: u16 = 400;

/// Failure to obtain any HTTP status from the target.
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("probe timed out")]
    Timeout,

    #[error("probe request failed: {0}")]
    Request(String),
}

/// Outcome of probing an original URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reachability {
    Reachable,
    Unreachable,
}

impl Reachability {
    /// Classifies a probe result: any status below 400 is reachable; errors,
    /// timeouts and 4xx/5xx statuses are not.
    pub fn classify(result: &Result<u16, ProbeError>) -> Self {
        match result {
            Ok(status) if *status < UNREACHABLE_STATUS_FLOOR => Reachability::Reachable,
            _ => Reachability::Unreachable,
        }
    }
}

/// Issues a lightweight (HEAD-style) request against a URL.
///
/// # Implementations
///
/// - [`crate::infrastructure::http::HttpReachabilityProbe`] - `reqwest` HEAD request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReachabilityProbe: Send + Sync {
    /// Returns the final HTTP status code of the probe.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError`] on network failure or timeout.
    async fn probe(&self, url: &str) -> Result<u16, ProbeError>;
}
