//! Redis pub/sub bus.

use super::service::{BusError, BusResult, EventBus};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Publishes payloads with Redis `PUBLISH`.
///
/// Subscribers that are not connected at publish time never see the message.
#[derive(Clone)]
pub struct RedisBus {
    client: ConnectionManager,
}

impl RedisBus {
    /// Connects to the bus and performs a PING handshake.
    ///
    /// This is a single attempt; startup wraps it in
    /// [`crate::infrastructure::bootstrap::connect_with_retry`].
    ///
    /// # Errors
    ///
    /// Returns [`BusError::ConnectionError`] if the connection or handshake fails.
    pub async fn connect(bus_url: &str) -> BusResult<Self> {
        info!("Connecting to message bus");

        let client = Client::open(bus_url)
            .map_err(|e| BusError::ConnectionError(format!("Invalid bus URL: {}", e)))?;

        let manager = ConnectionManager::new(client)
            .await
            .map_err(|e| BusError::ConnectionError(format!("Failed to connect: {}", e)))?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| BusError::ConnectionError(format!("PING failed: {}", e)))?;

        info!("✓ Connected to message bus");

        Ok(Self { client: manager })
    }
}

#[async_trait]
impl EventBus for RedisBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> BusResult<()> {
        let mut conn = self.client.clone();
        let size = payload.len();

        let receivers = conn
            .publish::<_, _, i64>(topic, payload)
            .await
            .map_err(|e| BusError::PublishError(e.to_string()))?;

        debug!(topic, size, receivers, "Published event");
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
