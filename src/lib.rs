//! # Veritas
//!
//! URL shortener core built with Axum, PostgreSQL and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - URL record, resolution event and collaborator traits
//! - **Application Layer** ([`application`]) - Creation, resolution, verification and publishing
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, Redis cache, Redis bus, HTTP probe
//! - **API Layer** ([`api`]) - REST handlers, DTOs and middleware
//! - **Events** ([`events`]) - Versioned wire schema of published events
//!
//! ## Request-time data path
//!
//! - `POST /api/create` inserts the record, derives its base62 code from the
//!   store id, answers `201` and verifies the original URL in the background.
//!   Unreachable targets are deleted again.
//! - `GET /{short_code}` reads through the cache, falls back to the store,
//!   answers `307` and publishes a resolution event without waiting for it.
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{
        EventPublisher, ReachabilityVerifier, ResolveService, ShortenService,
    };
    pub use crate::domain::entities::UrlRecord;
    pub use crate::domain::resolution_event::{ClientInfo, ResolutionEvent};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
