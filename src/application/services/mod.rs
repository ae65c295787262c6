//! Business logic services for the application layer.

pub mod event_publisher;
pub mod reachability_verifier;
pub mod resolve_service;
pub mod shorten_service;

pub use event_publisher::EventPublisher;
pub use reachability_verifier::{ReachabilityVerifier, Verification};
pub use resolve_service::ResolveService;
pub use shorten_service::{ShortenService, ShortenedUrl};
