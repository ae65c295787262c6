//! Cache-aside resolution of short codes.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

use crate::application::services::EventPublisher;
use crate::domain::repositories::UrlRepository;
use crate::domain::resolution_event::{ClientInfo, ResolutionEvent};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;

/// Resolves short codes to original URLs.
///
/// # Lookup Order
///
/// 1. Cache. A hit is trusted as-is; the store is not consulted.
/// 2. Store, on a miss or when the cache could not be queried.
/// 3. On a store hit the mapping is written back to the cache. A failed write
///    is logged and does not affect the result.
///
/// Every successful resolution hands a [`ResolutionEvent`] to the
/// [`EventPublisher`] without waiting for it.
pub struct ResolveService {
    repository: Arc<dyn UrlRepository>,
    cache: Arc<dyn CacheService>,
    publisher: EventPublisher,
    cache_ttl: Option<Duration>,
}

impl ResolveService {
    /// Creates a resolve service.
    ///
    /// `cache_ttl` is applied to entries written on a miss; `None` stores them
    /// without expiry.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        cache: Arc<dyn CacheService>,
        publisher: EventPublisher,
        cache_ttl: Option<Duration>,
    ) -> Self {
        Self {
            repository,
            cache,
            publisher,
            cache_ttl,
        }
    }

    /// Returns the original URL for `short_code` and schedules a resolution event.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if `short_code` is empty
    /// - [`AppError::NotFound`] if no record carries the code
    /// - [`AppError::Dependency`] if the store could not be queried
    pub async fn resolve(&self, short_code: &str, client: &ClientInfo) -> Result<String, AppError> {
        if short_code.is_empty() {
            return Err(AppError::bad_request("Short code is required"));
        }

        let original_url = match self.cache.get_url(short_code).await {
            Ok(Some(url)) => {
                debug!(%short_code, "Cache HIT");
                metrics::counter!("veritas_cache_hits_total").increment(1);
                url
            }
            Ok(None) => {
                debug!(%short_code, "Cache MISS");
                metrics::counter!("veritas_cache_misses_total").increment(1);
                self.load_and_cache(short_code).await?
            }
            Err(e) => {
                warn!(%short_code, error = %e, "Cache lookup failed, falling back to store");
                metrics::counter!("veritas_cache_errors_total").increment(1);
                self.load_and_cache(short_code).await?
            }
        };

        let event = ResolutionEvent::new(short_code.to_string(), original_url.clone(), client);
        self.publisher.publish(event);

        Ok(original_url)
    }

    async fn load_and_cache(&self, short_code: &str) -> Result<String, AppError> {
        let original_url = match self.repository.get_url_by_short_code(short_code).await {
            Ok(Some(url)) => url,
            Ok(None) => return Err(AppError::not_found("URL not found")),
            Err(e) => {
                error!(%short_code, error = %e, "Failed to get URL");
                return Err(AppError::dependency("Failed to get URL"));
            }
        };

        if let Err(e) = self
            .cache
            .set_url(short_code, &original_url, self.cache_ttl)
            .await
        {
            warn!(%short_code, error = %e, "Failed to cache URL");
        }

        Ok(original_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::bus::{BusError, MockEventBus};
    use crate::infrastructure::cache::{CacheError, MockCacheService};
    use crate::domain::repositories::MockUrlRepository;

    const TTL: Duration = Duration::from_secs(3600);

    fn quiet_bus() -> MockEventBus {
        let mut bus = MockEventBus::new();
        bus.expect_publish().returning(|_, _| Ok(()));
        bus
    }

    fn service(
        repo: MockUrlRepository,
        cache: MockCacheService,
        bus: MockEventBus,
    ) -> ResolveService {
        let publisher = EventPublisher::new(
            Arc::new(bus),
            "veritas.redirect.success",
            Duration::from_secs(5),
        );
        ResolveService::new(Arc::new(repo), Arc::new(cache), publisher, Some(TTL))
    }

    #[tokio::test]
    async fn test_empty_code_is_rejected() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code().times(0);
        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(0);

        let err = service(repo, cache, quiet_bus())
            .resolve("", &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(err.to_string(), "Short code is required");
    }

    #[tokio::test]
    async fn test_cache_hit_skips_store() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code().times(0);

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .withf(|code| code == "dnh")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));
        cache.expect_set_url().times(0);

        let url = service(repo, cache, quiet_bus())
            .resolve("dnh", &ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_cache_miss_reads_store_and_populates_cache() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code()
            .withf(|code| code == "dnh")
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().times(1).returning(|_| Ok(None));
        cache
            .expect_set_url()
            .withf(|code, url, ttl| {
                code == "dnh" && url == "https://example.com" && *ttl == Some(TTL)
            })
            .times(1)
            .returning(|_, _, _| Ok(()));

        let url = service(repo, cache, quiet_bus())
            .resolve("dnh", &ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_cache_error_degrades_to_miss() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code()
            .times(1)
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .returning(|_| Err(CacheError::ConnectionError("refused".to_string())));
        cache
            .expect_set_url()
            .returning(|_, _, _| Err(CacheError::ConnectionError("refused".to_string())));

        let url = service(repo, cache, quiet_bus())
            .resolve("dnh", &ClientInfo::default())
            .await
            .unwrap();

        assert_eq!(url, "https://example.com");
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_not_fatal() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code()
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache
            .expect_set_url()
            .times(1)
            .returning(|_, _, _| Err(CacheError::OperationError("OOM".to_string())));

        let result = service(repo, cache, quiet_bus())
            .resolve("dnh", &ClientInfo::default())
            .await;

        assert_eq!(result.unwrap(), "https://example.com");
    }

    #[tokio::test]
    async fn test_unknown_code_is_not_found() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code().returning(|_| Ok(None));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));
        cache.expect_set_url().times(0);

        let mut bus = MockEventBus::new();
        bus.expect_publish().times(0);

        let err = service(repo, cache, bus)
            .resolve("zzz", &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
        assert_eq!(err.to_string(), "URL not found");
    }

    #[tokio::test]
    async fn test_store_failure_is_dependency_error() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code()
            .returning(|_| Err(AppError::dependency("Database error")));

        let mut cache = MockCacheService::new();
        cache.expect_get_url().returning(|_| Ok(None));

        let err = service(repo, cache, quiet_bus())
            .resolve("dnh", &ClientInfo::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Dependency { .. }));
        assert_eq!(err.to_string(), "Failed to get URL");
    }

    #[tokio::test]
    async fn test_publish_failure_does_not_change_result() {
        let mut repo = MockUrlRepository::new();
        repo.expect_get_url_by_short_code().times(0);

        let mut cache = MockCacheService::new();
        cache
            .expect_get_url()
            .returning(|_| Ok(Some("https://example.com".to_string())));

        let mut bus = MockEventBus::new();
        bus.expect_publish()
            .returning(|_, _| Err(BusError::PublishError("down".to_string())));

        let client = ClientInfo::new(Some("TestBot/1.0"), Some("10.0.0.1".parse().unwrap()));
        let url = service(repo, cache, bus).resolve("dnh", &client).await.unwrap();

        assert_eq!(url, "https://example.com");
    }
}
