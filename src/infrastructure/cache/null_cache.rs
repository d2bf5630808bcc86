//! No-op cache implementation.

use super::service::CacheService;
use async_trait::async_trait;
use tracing::debug;

/// A cache that stores nothing.
///
/// Used when no Redis is configured or the connection fails at startup.
pub struct NullCache;

impl NullCache {
    pub fn new() -> Self {
        debug!("Using NullCache (caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheService for NullCache {
    async fn get_long_url(&self, _code: &str) -> Option<String> {
        None
    }

    async fn put_long_url(&self, _code: &str, _long_url: &str) {}

    async fn health_check(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_cache_never_hits() {
        let cache = NullCache::new();
        cache.put_long_url("abc", "https://example.com/").await;

        assert_eq!(cache.get_long_url("abc").await, None);
        assert!(cache.health_check().await);
    }
}
