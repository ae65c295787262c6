//! Application layer services implementing the request-time data path.
//!
//! Services consume the domain and infrastructure traits and provide a clean
//! API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::ShortenService`] - Creation pipeline (insert, derive code, attach)
//! - [`services::ResolveService`] - Cache-aside resolution of short codes
//! - [`services::ReachabilityVerifier`] - Detached probe with compensating delete
//! - [`services::EventPublisher`] - Fire-and-forget resolution events

pub mod services;
