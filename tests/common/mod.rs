#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower::Layer;
use veritas::api::handlers::{health_handler, missing_code_handler, redirect_handler};
use veritas::api::routes::api_routes;
use veritas::application::services::{
    EventPublisher, ReachabilityVerifier, ResolveService, ShortenService,
};
use veritas::domain::entities::UrlRecord;
use veritas::domain::reachability::{ProbeError, ReachabilityProbe};
use veritas::domain::repositories::UrlRepository;
use veritas::error::AppError;
use veritas::events::REDIRECT_SUCCESS_TOPIC;
use veritas::infrastructure::bus::{BusError, BusResult, EventBus};
use veritas::infrastructure::cache::{CacheError, CacheResult, CacheService};
use veritas::state::AppState;

pub const BASE_URL: &str = "http://localhost:8080";
pub const CLIENT_ADDR: &str = "127.0.0.1:12345";

// ── Store ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeStore {
    rows: Mutex<HashMap<i64, UrlRecord>>,
    next_id: AtomicI64,
    pub lookups: AtomicUsize,
    pub deletes: AtomicUsize,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_lookup: AtomicBool,
    pub unhealthy: AtomicBool,
}

impl FakeStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.lock().unwrap().contains_key(&id)
    }

    pub fn record(&self, id: i64) -> Option<UrlRecord> {
        self.rows.lock().unwrap().get(&id).cloned()
    }

    pub fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UrlRepository for FakeStore {
    async fn create_url(&self, original_url: &str) -> Result<i64, AppError> {
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(AppError::dependency("Database error"));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let record = UrlRecord::new(id, original_url.to_string(), None, Utc::now());
        self.rows.lock().unwrap().insert(id, record);
        Ok(id)
    }

    async fn update_short_code(&self, id: i64, short_code: &str) -> Result<(), AppError> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(AppError::dependency("Database error"));
        }

        match self.rows.lock().unwrap().get_mut(&id) {
            Some(record) => {
                record.short_code = Some(short_code.to_string());
                Ok(())
            }
            None => Err(AppError::dependency("Database error")),
        }
    }

    async fn get_url_by_short_code(&self, short_code: &str) -> Result<Option<String>, AppError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_lookup.load(Ordering::SeqCst) {
            return Err(AppError::dependency("Database error"));
        }

        Ok(self
            .rows
            .lock()
            .unwrap()
            .values()
            .find(|r| r.short_code.as_deref() == Some(short_code))
            .map(|r| r.original_url.clone()))
    }

    async fn delete_url(&self, id: i64) -> Result<(), AppError> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.rows.lock().unwrap().remove(&id);
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.unhealthy.load(Ordering::SeqCst)
    }
}

// ── Cache ───────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeCache {
    entries: Mutex<HashMap<String, String>>,
    pub gets: AtomicUsize,
    pub sets: AtomicUsize,
    pub broken: AtomicBool,
}

impl FakeCache {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn broken() -> Arc<Self> {
        let cache = Self::default();
        cache.broken.store(true, Ordering::SeqCst);
        Arc::new(cache)
    }

    pub fn get(&self, short_code: &str) -> Option<String> {
        self.entries.lock().unwrap().get(short_code).cloned()
    }

    pub fn gets(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn sets(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CacheService for FakeCache {
    async fn get_url(&self, short_code: &str) -> CacheResult<Option<String>> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        Ok(self.get(short_code))
    }

    async fn set_url(
        &self,
        short_code: &str,
        original_url: &str,
        _ttl: Option<Duration>,
    ) -> CacheResult<()> {
        self.sets.fetch_add(1, Ordering::SeqCst);
        if self.broken.load(Ordering::SeqCst) {
            return Err(CacheError::ConnectionError("connection refused".to_string()));
        }
        self.entries
            .lock()
            .unwrap()
            .insert(short_code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.broken.load(Ordering::SeqCst)
    }
}

// ── Bus ─────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeBus {
    published: Mutex<Vec<(String, Vec<u8>)>>,
    pub attempts: AtomicUsize,
    pub failing: AtomicBool,
}

impl FakeBus {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        let bus = Self::default();
        bus.failing.store(true, Ordering::SeqCst);
        Arc::new(bus)
    }

    pub fn published(&self) -> Vec<(String, Vec<u8>)> {
        self.published.lock().unwrap().clone()
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EventBus for FakeBus {
    async fn publish(&self, topic: &str, payload: Vec<u8>) -> BusResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(BusError::PublishError("bus unavailable".to_string()));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), payload));
        Ok(())
    }

    async fn health_check(&self) -> bool {
        !self.failing.load(Ordering::SeqCst)
    }
}

// ── Probe ───────────────────────────────────────────────────────────────────

pub struct FakeProbe {
    status: Option<u16>,
}

impl FakeProbe {
    pub fn reachable() -> Arc<Self> {
        Arc::new(Self { status: Some(200) })
    }

    pub fn answering(status: u16) -> Arc<Self> {
        Arc::new(Self {
            status: Some(status),
        })
    }

    pub fn unreachable() -> Arc<Self> {
        Arc::new(Self { status: None })
    }
}

#[async_trait]
impl ReachabilityProbe for FakeProbe {
    async fn probe(&self, _url: &str) -> Result<u16, ProbeError> {
        self.status
            .ok_or_else(|| ProbeError::Request("connection refused".to_string()))
    }
}

// ── Wiring ──────────────────────────────────────────────────────────────────

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<FakeStore>,
    pub cache: Arc<FakeCache>,
    pub bus: Arc<FakeBus>,
}

pub fn create_test_state(
    store: Arc<FakeStore>,
    cache: Arc<FakeCache>,
    bus: Arc<FakeBus>,
    probe: Arc<FakeProbe>,
) -> TestContext {
    let verifier = Arc::new(ReachabilityVerifier::new(
        probe,
        store.clone(),
        Duration::from_secs(5),
    ));
    let publisher = EventPublisher::new(bus.clone(), REDIRECT_SUCCESS_TOPIC, Duration::from_secs(5));

    let shorten_service = Arc::new(ShortenService::new(store.clone(), verifier, BASE_URL));
    let resolve_service = Arc::new(ResolveService::new(
        store.clone(),
        cache.clone(),
        publisher,
        Some(Duration::from_secs(3600)),
    ));

    let state = AppState::new(
        shorten_service,
        resolve_service,
        store.clone(),
        cache.clone(),
        bus.clone(),
    );

    TestContext {
        state,
        store,
        cache,
        bus,
    }
}

pub fn default_context() -> TestContext {
    create_test_state(
        FakeStore::new(),
        FakeCache::new(),
        FakeBus::new(),
        FakeProbe::reachable(),
    )
}

/// Full route table, with a fixed peer address injected for `ConnectInfo`.
pub fn test_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(missing_code_handler))
        .route("/health", get(health_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api", api_routes())
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

/// Polls `condition` every 10ms until it holds or `limit` elapses.
pub async fn wait_until(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = tokio::time::Instant::now() + limit;
    loop {
        if condition() {
            return true;
        }
        if tokio::time::Instant::now() >= deadline {
            return false;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = CLIENT_ADDR.parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
