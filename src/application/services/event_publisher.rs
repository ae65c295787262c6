//! Fire-and-forget publication of resolution events.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::domain::resolution_event::ResolutionEvent;
use crate::events::v1::encode_event;
use crate::infrastructure::bus::{BusError, EventBus};

/// Hands resolution events to the bus without ever affecting the caller.
///
/// Every call to [`EventPublisher::publish`] spawns its own task with its own
/// timeout, so the publish outlives the request that triggered it. Failures are
/// logged and dropped: delivery is at-most-once with no retry.
#[derive(Clone)]
pub struct EventPublisher {
    bus: Arc<dyn EventBus>,
    topic: String,
    timeout: Duration,
}

impl EventPublisher {
    /// Creates a publisher for a single topic.
    pub fn new(bus: Arc<dyn EventBus>, topic: impl Into<String>, timeout: Duration) -> Self {
        Self {
            bus,
            topic: topic.into(),
            timeout,
        }
    }

    /// Publishes `event` on a detached task.
    ///
    /// Returns immediately. The handle is only useful to tests; production code
    /// drops it.
    pub fn publish(&self, event: ResolutionEvent) -> JoinHandle<()> {
        let publisher = self.clone();

        tokio::spawn(async move {
            let short_code = event.short_code.clone();

            match publisher.publish_now(&event).await {
                Ok(()) => {
                    metrics::counter!("veritas_events_published_total").increment(1);
                    debug!(topic = %publisher.topic, %short_code, "Published resolution event");
                }
                Err(e) => {
                    metrics::counter!("veritas_events_dropped_total").increment(1);
                    warn!(topic = %publisher.topic, %short_code, error = %e, "Failed to publish resolution event");
                }
            }
        })
    }

    /// Encodes and publishes `event`, bounded by the publisher's timeout.
    ///
    /// # Errors
    ///
    /// Returns [`BusError`] if the bus fails or does not answer in time.
    pub async fn publish_now(&self, event: &ResolutionEvent) -> Result<(), BusError> {
        let payload = encode_event(event);

        tokio::time::timeout(self.timeout, self.bus.publish(&self.topic, payload))
            .await
            .map_err(|_| BusError::Timeout)?
    }
}
