//! TTL key-value cache layer.
//!
//! Provides the [`SnapshotCache`] trait with two implementations:
//! - [`RedisCache`]: Redis-backed, TTL enforced natively by the store.
//!   Fail-open: if Redis is unreachable at startup, the cache degrades to
//!   an always-miss no-op rather than failing callers.
//! - [`MemoryCache`]: in-process HashMap with lazy expiry on read. Used in
//!   tests and as a configurable backend when no Redis is deployed.

pub mod error;
pub mod memory;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use memory::MemoryCache;
pub use store::{RedisCache, SnapshotCache};
