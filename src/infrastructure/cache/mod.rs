//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheService`] trait with a Redis-backed implementation,
//! [`RedisCache`]. The cache is populated lazily by the resolution pipeline and
//! never written by the creation pipeline.

mod redis_cache;
mod service;

pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheResult, CacheService};

#[cfg(test)]
pub use service::MockCacheService;
