//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{ResolveService, ShortenService};
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::bus::EventBus;
use crate::infrastructure::cache::CacheService;

/// Long-lived handles cloned into each request.
///
/// The raw `repository`, `cache` and `bus` handles are only used by the health
/// check; request-time logic goes through the services.
#[derive(Clone)]
pub struct AppState {
    pub shorten_service: Arc<ShortenService>,
    pub resolve_service: Arc<ResolveService>,
    pub repository: Arc<dyn UrlRepository>,
    pub cache: Arc<dyn CacheService>,
    pub bus: Arc<dyn EventBus>,
}

impl AppState {
    pub fn new(
        shorten_service: Arc<ShortenService>,
        resolve_service: Arc<ResolveService>,
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        bus: Arc<dyn EventBus>,
    ) -> Self {
        Self {
            shorten_service,
            resolve_service,
            repository,
            cache,
            bus,
        }
    }
}
