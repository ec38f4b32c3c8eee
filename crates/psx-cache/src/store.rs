//! Cache trait and the Redis-backed implementation.

use crate::error::{CacheError, CacheResult};
use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Connect timeout for the initial Redis handshake.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

/// Key-value cache with per-key TTL.
///
/// Implementations never surface errors to callers: a failed `get` is a
/// miss, a failed `set`/`delete`/`clear` returns `false`. Values are JSON
/// documents; a value that fails to deserialize on read is a miss.
#[async_trait]
pub trait SnapshotCache: Send + Sync {
    /// Get a value, or `None` on miss, expiry, or store failure.
    async fn get(&self, key: &str) -> Option<Value>;

    /// Set a value with a TTL. Returns `false` when the store is
    /// unavailable or the write failed.
    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> bool;

    /// Delete a key. Returns `false` when the store is unavailable.
    async fn delete(&self, key: &str) -> bool;

    /// Clear all keys. Returns `false` when the store is unavailable.
    async fn clear(&self) -> bool;

    /// Whether the backing store was reachable at construction.
    fn is_available(&self) -> bool;
}

/// Redis-backed cache. TTL is enforced natively by Redis (`SET ... EX`);
/// no expiry tracking happens on this side.
pub struct RedisCache {
    /// `None` when the store was unreachable at startup. The flag is
    /// permanent for the cache's lifetime; there are no reconnect attempts.
    connection: Option<MultiplexedConnection>,
}

impl RedisCache {
    /// Connect to Redis, degrading to an always-miss cache on failure.
    ///
    /// The connection attempt is bounded by a short timeout so a missing
    /// Redis does not stall process startup.
    pub async fn connect(url: &str) -> Self {
        match Self::try_connect(url).await {
            Ok(connection) => {
                info!(url = %url, "Redis connected");
                Self {
                    connection: Some(connection),
                }
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Redis not available, caching disabled");
                Self { connection: None }
            }
        }
    }

    async fn try_connect(url: &str) -> CacheResult<MultiplexedConnection> {
        let client = redis::Client::open(url)?;
        let mut connection = tokio::time::timeout(
            CONNECT_TIMEOUT,
            client.get_multiplexed_async_connection(),
        )
        .await
        .map_err(|_| CacheError::Unavailable)??;

        // Round-trip a PING so a half-open connection fails here, not on
        // the first request.
        redis::cmd("PING")
            .query_async::<()>(&mut connection)
            .await?;

        Ok(connection)
    }
}

#[async_trait]
impl SnapshotCache for RedisCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut conn = self.connection.clone()?;

        let raw: Option<String> = match conn.get(key).await {
            Ok(v) => v,
            Err(e) => {
                error!(key = %key, error = %e, "Cache get failed");
                return None;
            }
        };

        let raw = match raw {
            Some(v) => {
                debug!(key = %key, "Cache hit");
                v
            }
            None => {
                debug!(key = %key, "Cache miss");
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key = %key, error = %e, "Cached value failed to deserialize, treating as miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> bool {
        let Some(mut conn) = self.connection.clone() else {
            return false;
        };

        let raw = value.to_string();
        match conn.set_ex::<_, _, ()>(key, raw, ttl.as_secs()).await {
            Ok(()) => {
                debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached value");
                true
            }
            Err(e) => {
                error!(key = %key, error = %e, "Cache set failed");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        let Some(mut conn) = self.connection.clone() else {
            return false;
        };

        match conn.del::<_, ()>(key).await {
            Ok(()) => {
                debug!(key = %key, "Deleted from cache");
                true
            }
            Err(e) => {
                error!(key = %key, error = %e, "Cache delete failed");
                false
            }
        }
    }

    async fn clear(&self) -> bool {
        let Some(mut conn) = self.connection.clone() else {
            return false;
        };

        match redis::cmd("FLUSHDB").query_async::<()>(&mut conn).await {
            Ok(()) => {
                info!("Cache cleared");
                true
            }
            Err(e) => {
                error!(error = %e, "Cache clear failed");
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        self.connection.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_unreachable_store_degrades_to_no_op() {
        // Port 9 (discard) is not listening; connection is refused fast.
        let cache = RedisCache::connect("redis://127.0.0.1:9").await;

        assert!(!cache.is_available());
        assert_eq!(cache.get("index:KSE100").await, None);
        assert!(!cache.set("index:KSE100", &json!({"value": 1}), Duration::from_secs(300)).await);
        assert!(!cache.delete("index:KSE100").await);
        assert!(!cache.clear().await);
    }
}
