//! Redis-backed cache implementation.

use super::service::{CacheError, CacheResult, CacheService};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

const KEY_PREFIX: &str = "code:";

/// Redis cache of redirect targets.
///
/// Uses `ConnectionManager` for automatic reconnects; clones share one
/// multiplexed connection.
pub struct RedisCache {
    conn: ConnectionManager,
    ttl_seconds: u64,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// `ttl_seconds` is applied to every entry (`CACHE_TTL_SECONDS`).
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Connection`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str, ttl_seconds: u64) -> CacheResult<Self> {
        info!("Connecting to Redis at {}", redis_url);

        let client = Client::open(redis_url)
            .map_err(|e| CacheError::Connection(format!("Failed to create Redis client: {}", e)))?;

        let conn = ConnectionManager::new(client)
            .await
            .map_err(|e| CacheError::Connection(format!("Failed to connect to Redis: {}", e)))?;

        let mut probe = conn.clone();
        probe
            .ping::<()>()
            .await
            .map_err(|e| CacheError::Connection(format!("Redis PING failed: {}", e)))?;

        info!("✓ Connected to Redis");

        Ok(Self {
            conn,
            ttl_seconds: ttl_seconds.max(1),
        })
    }
}

fn key(code: &str) -> String {
    format!("{KEY_PREFIX}{code}")
}

#[async_trait]
impl CacheService for RedisCache {
    async fn get_long_url(&self, code: &str) -> Option<String> {
        let mut conn = self.conn.clone();

        match conn.get::<_, Option<String>>(key(code)).await {
            Ok(hit) => {
                debug!(code, hit = hit.is_some(), "cache lookup");
                hit
            }
            Err(e) => {
                warn!("Redis GET error for {}: {}", code, e);
                None
            }
        }
    }

    async fn put_long_url(&self, code: &str, long_url: &str) {
        let mut conn = self.conn.clone();

        if let Err(e) = conn
            .set_ex::<_, _, ()>(key(code), long_url, self.ttl_seconds)
            .await
        {
            warn!("Redis SET error for {}: {}", code, e);
        }
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.conn.clone();
        conn.ping::<()>().await.is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_namespaced() {
        assert_eq!(key("-L"), "code:-L");
    }

    #[tokio::test]
    async fn test_connect_rejects_malformed_url() {
        let result = RedisCache::connect("not a redis url", 60).await;
        assert!(matches!(result, Err(CacheError::Connection(_))));
    }
}
