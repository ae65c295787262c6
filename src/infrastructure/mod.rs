//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for persistence, caching, messaging and outbound HTTP.
//!
//! # Modules
//!
//! - [`bootstrap`] - Startup connection establishment with retry and backoff
//! - [`bus`] - Message bus for resolution events (Redis pub/sub)
//! - [`cache`] - Short code cache (Redis)
//! - [`http`] - Reachability probe (`reqwest`)
//! - [`persistence`] - PostgreSQL repository implementation

pub mod bootstrap;
pub mod bus;
pub mod cache;
pub mod http;
pub mod persistence;
