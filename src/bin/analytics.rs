//! Analytics consumer for resolution events.
//!
//! Subscribes to the event topic on the Redis pub/sub bus, decodes every
//! payload with the `veritas.events.v1` schema and logs it. Payloads that do not
//! decode are logged and skipped.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin analytics -- --bus-url redis://localhost:6379/0
//! ```
//!
//! # Environment Variables
//!
//! - `BUS_URL` - Redis URL of the bus (falls back to `REDIS_URL`)
//! - `EVENT_TOPIC` - Topic to subscribe to (default: `veritas.redirect.success`)

use anyhow::{Context, Result};
use clap::Parser;
use futures_util::StreamExt;
use tracing::{error, info, warn};
use veritas::domain::resolution_event::ResolutionEvent;
use veritas::events::REDIRECT_SUCCESS_TOPIC;
use veritas::events::v1::decode_event;
use veritas::infrastructure::bootstrap::{BootstrapPolicy, connect_with_retry};

/// Logs every resolution event published by the veritas server.
#[derive(Parser, Debug)]
#[command(name = "analytics")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Redis URL of the message bus.
    #[arg(long, env = "BUS_URL")]
    bus_url: Option<String>,

    /// Fallback when no bus URL is given.
    #[arg(long, env = "REDIS_URL", default_value = "redis://127.0.0.1:6379")]
    redis_url: String,

    /// Topic to subscribe to.
    #[arg(long, env = "EVENT_TOPIC", default_value = REDIRECT_SUCCESS_TOPIC)]
    topic: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_new(&args.log_level)
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bus_url = args.bus_url.clone().unwrap_or_else(|| args.redis_url.clone());
    let client = redis::Client::open(bus_url.as_str()).context("Invalid bus URL")?;

    let mut pubsub = connect_with_retry("bus", &BootstrapPolicy::default(), || {
        client.get_async_pubsub()
    })
    .await?;

    pubsub
        .subscribe(&args.topic)
        .await
        .with_context(|| format!("Failed to subscribe to '{}'", args.topic))?;
    info!(topic = %args.topic, "Subscribed, waiting for events");

    let messages = pubsub.on_message();
    tokio::pin!(messages);

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    let mut received = 0u64;

    loop {
        tokio::select! {
            message = messages.next() => {
                let Some(message) = message else {
                    error!("Subscription closed by the bus");
                    break;
                };

                if let Some(event) = handle_payload(message.get_payload_bytes()) {
                    received += 1;
                    info!(
                        short_code = %event.short_code,
                        original_url = %event.original_url,
                        user_agent = %event.user_agent,
                        ip_address = %event.ip_address,
                        "Redirect event"
                    );
                }
            }
            _ = &mut shutdown => {
                info!(received, "Received shutdown signal, exiting...");
                break;
            }
        }
    }

    Ok(())
}

/// Decodes one payload; undecodable payloads are logged and dropped.
fn handle_payload(payload: &[u8]) -> Option<ResolutionEvent> {
    match decode_event(payload) {
        Ok(event) => Some(event),
        Err(e) => {
            warn!(size = payload.len(), error = %e, "Skipping undecodable payload");
            None
        }
    }
}
