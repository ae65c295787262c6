//! HTTP server initialization and runtime setup.
//!
//! Connects every dependency with retry, applies migrations, wires the
//! services and runs the Axum server until a shutdown signal arrives.

use crate::application::services::{
    EventPublisher, ReachabilityVerifier, ResolveService, ShortenService,
};
use crate::config::Config;
use crate::domain::repositories::UrlRepository;
use crate::infrastructure::bootstrap::{connect_database, connect_with_retry};
use crate::infrastructure::bus::{EventBus, RedisBus};
use crate::infrastructure::cache::{CacheService, RedisCache};
use crate::infrastructure::http::HttpReachabilityProbe;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes, in order:
/// - PostgreSQL connection pool (with retry)
/// - Migrations
/// - Redis cache (with retry)
/// - Message bus (with retry)
/// - Services and the Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - A dependency never becomes live within the retry policy
/// - Migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let policy = config.bootstrap_policy();

    let pool = connect_database(&config.database_url, config.db_max_connections, &policy).await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    let redis_url = config.redis_url.clone();
    let cache = connect_with_retry("redis-cache", &policy, || RedisCache::connect(&redis_url)).await?;
    tracing::info!("Cache enabled (Redis)");

    let bus_url = config.bus_url.clone();
    let bus = connect_with_retry("bus", &policy, || RedisBus::connect(&bus_url)).await?;
    tracing::info!(topic = %config.event_topic, "Event bus enabled (Redis pub/sub)");

    let repository: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(pool));
    let cache: Arc<dyn CacheService> = Arc::new(cache);
    let bus: Arc<dyn EventBus> = Arc::new(bus);

    let probe = HttpReachabilityProbe::new(config.reachability_timeout())
        .context("Failed to build HTTP client for reachability checks")?;
    let verifier = Arc::new(ReachabilityVerifier::new(
        Arc::new(probe),
        repository.clone(),
        config.reachability_timeout(),
    ));

    let publisher = EventPublisher::new(
        bus.clone(),
        config.event_topic.clone(),
        config.publish_timeout(),
    );

    let shorten_service = Arc::new(ShortenService::new(
        repository.clone(),
        verifier,
        config.base_url.clone(),
    ));
    let resolve_service = Arc::new(ResolveService::new(
        repository.clone(),
        cache.clone(),
        publisher,
        config.cache_ttl(),
    ));

    let state = AppState::new(shorten_service, resolve_service, repository, cache, bus);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
