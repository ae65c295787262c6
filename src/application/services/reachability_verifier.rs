//! Detached reachability verification with compensating delete.
//!
//! A freshly created record is probed after the creation response has been
//! produced. If the original URL does not answer, the record is deleted again,
//! so a short code that just returned 201 may start returning 404 a few seconds
//! later. A mapping that was already cached keeps resolving until the cache
//! entry expires.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use crate::domain::reachability::{ProbeError, Reachability, ReachabilityProbe};
use crate::domain::repositories::UrlRepository;

/// Final state of one verification run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verification {
    /// The original URL answered with a status below 400.
    Reachable,
    /// The URL was unreachable and its record was deleted.
    Deleted,
    /// The URL was unreachable but the delete failed; the record stays.
    DeleteFailed,
}

/// Probes original URLs and retracts records that point nowhere.
#[derive(Clone)]
pub struct ReachabilityVerifier {
    probe: Arc<dyn ReachabilityProbe>,
    repository: Arc<dyn UrlRepository>,
    timeout: Duration,
}

impl ReachabilityVerifier {
    /// Creates a verifier.
    ///
    /// `timeout` bounds the probe independently of any inbound request.
    pub fn new(
        probe: Arc<dyn ReachabilityProbe>,
        repository: Arc<dyn UrlRepository>,
        timeout: Duration,
    ) -> Self {
        Self {
            probe,
            repository,
            timeout,
        }
    }

    /// Schedules verification of record `id` on its own task.
    ///
    /// The task is not tied to the caller: dropping the returned handle, or
    /// cancelling the request that scheduled it, does not stop it.
    pub fn schedule(&self, id: i64, original_url: String) -> JoinHandle<Verification> {
        let verifier = self.clone();
        tokio::spawn(async move { verifier.verify(id, &original_url).await })
    }

    /// Probes `original_url` and deletes record `id` if it is unreachable.
    ///
    /// Never returns an error; every failure ends up in the logs and in the
    /// returned [`Verification`].
    pub async fn verify(&self, id: i64, original_url: &str) -> Verification {
        let result = tokio::time::timeout(self.timeout, self.probe.probe(original_url))
            .await
            .unwrap_or(Err(ProbeError::Timeout));

        match Reachability::classify(&result) {
            Reachability::Reachable => {
                debug!(id, url = original_url, "Original URL is reachable");
                Verification::Reachable
            }
            Reachability::Unreachable => {
                match &result {
                    Ok(status) => warn!(
                        id,
                        url = original_url,
                        status,
                        "Reachability check returned non-success status"
                    ),
                    Err(e) => warn!(id, url = original_url, error = %e, "Reachability check failed"),
                }

                info!(id, "URL is not reachable, deleting");
                metrics::counter!("veritas_unreachable_urls_total").increment(1);

                match self.repository.delete_url(id).await {
                    Ok(()) => Verification::Deleted,
                    Err(e) => {
                        error!(id, error = %e, "Failed to delete unreachable URL");
                        Verification::DeleteFailed
                    }
                }
            }
        }
    }
}
