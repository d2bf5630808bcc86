//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors that can occur while setting up a cache backend.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Cache connection error: {0}")]
    Connection(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Read-through cache of `code -> long_url` mappings for redirects.
///
/// Records never change once written, so entries only expire by TTL.
/// Lookups and writes are fail-open: a backend error behaves like a miss and
/// the caller falls back to the store.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached long URL for `code`, or `None` on miss or error.
    async fn get_long_url(&self, code: &str) -> Option<String>;

    /// Caches `long_url` under `code`. Errors are logged, never returned.
    async fn put_long_url(&self, code: &str, long_url: &str);

    /// Checks if the cache backend is reachable.
    async fn health_check(&self) -> bool;
}
