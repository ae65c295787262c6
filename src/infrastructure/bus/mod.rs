//! Message bus used to hand resolution events to the analytics consumer.
//!
//! - [`EventBus`] - Publish contract (`topic`, opaque bytes)
//! - [`RedisBus`] - Redis pub/sub implementation (`PUBLISH`)

mod redis_bus;
mod service;

pub use redis_bus::RedisBus;
pub use service::{BusError, BusResult, EventBus};

#[cfg(test)]
pub use service::MockEventBus;
