//! In-process cache backend.

use crate::store::SnapshotCache;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};
use tracing::{debug, error};

struct Entry {
    value: Value,
    expires_at: Instant,
}

/// HashMap-backed cache with per-key expiry checked lazily on read.
///
/// There is no background eviction sweep; expired entries are removed the
/// next time they are read.
#[derive(Default)]
pub struct MemoryCache {
    data: RwLock<HashMap<String, Entry>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotCache for MemoryCache {
    async fn get(&self, key: &str) -> Option<Value> {
        let mut data = match self.data.write() {
            Ok(guard) => guard,
            Err(e) => {
                error!(error = %e, "Memory cache lock poisoned");
                return None;
            }
        };

        match data.get(key) {
            Some(entry) if entry.expires_at > Instant::now() => {
                debug!(key = %key, "Cache hit");
                Some(entry.value.clone())
            }
            Some(_) => {
                debug!(key = %key, "Cache entry expired");
                data.remove(key);
                None
            }
            None => {
                debug!(key = %key, "Cache miss");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &Value, ttl: Duration) -> bool {
        match self.data.write() {
            Ok(mut data) => {
                data.insert(
                    key.to_string(),
                    Entry {
                        value: value.clone(),
                        expires_at: Instant::now() + ttl,
                    },
                );
                debug!(key = %key, ttl_secs = ttl.as_secs(), "Cached value");
                true
            }
            Err(e) => {
                error!(error = %e, "Memory cache lock poisoned");
                false
            }
        }
    }

    async fn delete(&self, key: &str) -> bool {
        match self.data.write() {
            Ok(mut data) => {
                data.remove(key);
                true
            }
            Err(e) => {
                error!(error = %e, "Memory cache lock poisoned");
                false
            }
        }
    }

    async fn clear(&self) -> bool {
        match self.data.write() {
            Ok(mut data) => {
                data.clear();
                true
            }
            Err(e) => {
                error!(error = %e, "Memory cache lock poisoned");
                false
            }
        }
    }

    fn is_available(&self) -> bool {
        true
    }
}
