//! Event bus trait and error types.

use async_trait::async_trait;

/// Errors that can occur while talking to the bus.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Bus connection error: {0}")]
    ConnectionError(String),

    #[error("Bus publish error: {0}")]
    PublishError(String),

    #[error("Bus publish timed out")]
    Timeout,
}

/// Result type for bus operations.
pub type BusResult<T> = Result<T, BusError>;

/// Publish side of the message bus.
///
/// Delivery is at-most-once: a payload handed to a failing bus is lost.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventBus: Send + Sync {
    /// Publishes one payload to a topic.
    ///
    /// # Errors
    ///
    /// Returns [`BusError`] if the bus rejected or never received the payload.
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> BusResult<()>;

    /// Checks if the bus is reachable.
    async fn health_check(&self) -> bool;
}
