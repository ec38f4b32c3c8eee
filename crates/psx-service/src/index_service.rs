//! Pipeline orchestration for index requests.

use crate::source::IndexSource;
use psx_cache::SnapshotCache;
use psx_core::IndexSnapshot;
use psx_data::index::{fallback_index, CONSTITUENT_COUNT, INDEX_NAME};
use psx_scraper::IndexFields;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// How long a freshly computed snapshot stays cached.
pub const CACHE_TTL: Duration = Duration::from_secs(300);

/// Cache-aside pipeline in front of the live index source.
///
/// Per request: cache lookup; on miss, fetch-and-extract; on any failure,
/// the static fallback snapshot. The pipeline is the guaranteed-success
/// tier of the index endpoint and never returns an error.
///
/// Dependencies are injected at startup and shared across requests.
/// Concurrent misses for the same key may race to fetch and populate the
/// cache redundantly; last write wins, which is harmless since all writes
/// within a TTL window derive from the same upstream page.
pub struct IndexService {
    source: Arc<dyn IndexSource>,
    cache: Arc<dyn SnapshotCache>,
    ttl: Duration,
}

impl IndexService {
    pub fn new(source: Arc<dyn IndexSource>, cache: Arc<dyn SnapshotCache>) -> Self {
        Self::with_ttl(source, cache, CACHE_TTL)
    }

    pub fn with_ttl(
        source: Arc<dyn IndexSource>,
        cache: Arc<dyn SnapshotCache>,
        ttl: Duration,
    ) -> Self {
        Self { source, cache, ttl }
    }

    fn cache_key(symbol: &str) -> String {
        format!("index:{symbol}")
    }

    /// Get the current snapshot for `symbol`.
    ///
    /// Within the TTL window consecutive calls return the cached snapshot
    /// verbatim, including its trading status and timestamp.
    pub async fn get_index(&self, symbol: &str) -> IndexSnapshot {
        let key = Self::cache_key(symbol);

        if let Some(value) = self.cache.get(&key).await {
            match serde_json::from_value::<IndexSnapshot>(value) {
                Ok(snapshot) => {
                    debug!(symbol = %symbol, "Serving cached snapshot");
                    return snapshot;
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Cached snapshot failed to deserialize, refetching");
                }
            }
        }

        let fields = match self.source.fetch_index(symbol).await {
            Ok(fields) => fields,
            Err(e) => {
                warn!(symbol = %symbol, error = %e, "Live fetch failed, serving static fallback");
                return fallback_index();
            }
        };

        let snapshot = enrich(fields);
        self.write_back(&key, &snapshot).await;
        info!(symbol = %symbol, value = snapshot.value, "Serving live snapshot");
        snapshot
    }

    /// Backfill the cache. A write failure is logged but never fails the
    /// request; the freshly computed snapshot is returned regardless.
    async fn write_back(&self, key: &str, snapshot: &IndexSnapshot) {
        let value = match serde_json::to_value(snapshot) {
            Ok(value) => value,
            Err(e) => {
                error!(key = %key, error = %e, "Snapshot serialization failed, skipping cache write");
                return;
            }
        };

        if !self.cache.set(key, &value, self.ttl).await {
            debug!(key = %key, "Cache write skipped or failed");
        }
    }
}

/// Build a full snapshot from extracted fields, filling fields the page
/// does not expose:
/// - `open` defaults to `previous_close`
/// - `high` / `low` default to the current value
/// - `average_volume_30d` defaults to the current volume
/// - `volume`, `market_cap`, constituent count and 52-week/ytd figures
///   default to the static reference values
fn enrich(fields: IndexFields) -> IndexSnapshot {
    let reference = fallback_index();
    let volume = fields.volume.unwrap_or(reference.volume);

    IndexSnapshot {
        symbol: fields.symbol,
        name: INDEX_NAME.to_string(),
        value: fields.value,
        change: fields.change,
        change_percent: fields.change_percent,
        previous_close: fields.previous_close,
        open: fields.previous_close,
        high: fields.high.unwrap_or(fields.value),
        low: fields.low.unwrap_or(fields.value),
        volume,
        market_cap: reference.market_cap,
        year_high: fields.year_high.unwrap_or(reference.year_high),
        year_low: fields.year_low.unwrap_or(reference.year_low),
        ytd_change_percent: fields
            .ytd_change_percent
            .unwrap_or(reference.ytd_change_percent),
        constituent_count: CONSTITUENT_COUNT,
        trading_status: fields.trading_status,
        timestamp: fields.timestamp,
        average_volume_30d: Some(volume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Utc;
    use psx_cache::MemoryCache;
    use psx_core::TradingStatus;
    use psx_scraper::ScrapeError;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeSource {
        fields: IndexFields,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn new(fields: IndexFields) -> Self {
            Self {
                fields,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl IndexSource for FakeSource {
        async fn fetch_index(&self, _symbol: &str) -> psx_scraper::ScrapeResult<IndexFields> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.fields.clone())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl IndexSource for FailingSource {
        async fn fetch_index(&self, symbol: &str) -> psx_scraper::ScrapeResult<IndexFields> {
            Err(ScrapeError::IndexNotFound(symbol.to_string()))
        }
    }

    /// Cache whose backing store was unreachable at startup.
    struct UnavailableCache;

    #[async_trait]
    impl SnapshotCache for UnavailableCache {
        async fn get(&self, _key: &str) -> Option<serde_json::Value> {
            None
        }
        async fn set(&self, _key: &str, _value: &serde_json::Value, _ttl: Duration) -> bool {
            false
        }
        async fn delete(&self, _key: &str) -> bool {
            false
        }
        async fn clear(&self) -> bool {
            false
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    fn sample_fields() -> IndexFields {
        IndexFields {
            symbol: "KSE100".to_string(),
            value: 95234.50,
            change: 287.30,
            change_percent: 0.30,
            previous_close: 94947.20,
            high: Some(95450.75),
            low: Some(94875.30),
            volume: Some(245_000_000),
            year_change_percent: None,
            ytd_change_percent: Some(12.5),
            year_high: None,
            year_low: None,
            trading_status: TradingStatus::Open,
            timestamp: Utc::now(),
        }
    }

    fn sparse_fields() -> IndexFields {
        IndexFields {
            symbol: "KSE100".to_string(),
            value: 95234.50,
            change: 287.30,
            change_percent: 0.30,
            previous_close: 94947.20,
            high: None,
            low: None,
            volume: None,
            year_change_percent: None,
            ytd_change_percent: None,
            year_high: None,
            year_low: None,
            trading_status: TradingStatus::Closed,
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_live_path_builds_enriched_snapshot() {
        let service = IndexService::new(
            Arc::new(FakeSource::new(sample_fields())),
            Arc::new(MemoryCache::new()),
        );

        let snapshot = service.get_index("KSE100").await;
        assert_eq!(snapshot.value, 95234.50);
        assert_eq!(snapshot.previous_close, 94947.20);
        assert_eq!(snapshot.open, 94947.20);
        assert_eq!(snapshot.high, 95450.75);
        assert_eq!(snapshot.volume, 245_000_000);
        assert_eq!(snapshot.average_volume_30d, Some(245_000_000));
        assert_eq!(snapshot.trading_status, TradingStatus::Open);
        assert_eq!(snapshot.name, INDEX_NAME);
    }

    #[tokio::test]
    async fn test_sparse_fields_take_documented_defaults() {
        let service = IndexService::new(
            Arc::new(FakeSource::new(sparse_fields())),
            Arc::new(MemoryCache::new()),
        );
        let reference = fallback_index();

        let snapshot = service.get_index("KSE100").await;
        assert_eq!(snapshot.open, snapshot.previous_close);
        assert_eq!(snapshot.high, snapshot.value);
        assert_eq!(snapshot.low, snapshot.value);
        assert_eq!(snapshot.volume, reference.volume);
        assert_eq!(snapshot.average_volume_30d, Some(reference.volume));
        assert_eq!(snapshot.year_high, reference.year_high);
        assert_eq!(snapshot.ytd_change_percent, reference.ytd_change_percent);
        assert_eq!(snapshot.constituent_count, 100);
    }

    #[tokio::test]
    async fn test_source_failure_falls_back_to_static_snapshot() {
        let service =
            IndexService::new(Arc::new(FailingSource), Arc::new(MemoryCache::new()));

        let snapshot = service.get_index("KSE100").await;
        assert_eq!(snapshot, fallback_index());
    }

    #[tokio::test]
    async fn test_second_call_within_ttl_is_a_cache_hit() {
        let source = Arc::new(FakeSource::new(sample_fields()));
        let service = IndexService::new(source.clone(), Arc::new(MemoryCache::new()));

        let first = service.get_index("KSE100").await;
        let second = service.get_index("KSE100").await;

        assert_eq!(first, second);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_corrupt_cache_entry_is_treated_as_miss() {
        let cache = Arc::new(MemoryCache::new());
        cache
            .set("index:KSE100", &json!({"garbage": true}), CACHE_TTL)
            .await;

        let source = Arc::new(FakeSource::new(sample_fields()));
        let service = IndexService::new(source.clone(), cache);

        let snapshot = service.get_index("KSE100").await;
        assert_eq!(snapshot.value, 95234.50);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unavailable_cache_is_fail_open() {
        let source = Arc::new(FakeSource::new(sample_fields()));
        let service = IndexService::new(source.clone(), Arc::new(UnavailableCache));

        let first = service.get_index("KSE100").await;
        assert_eq!(first.value, 95234.50);

        // Every call goes to the source; the request still succeeds.
        let _ = service.get_index("KSE100").await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fallback_with_unavailable_cache_still_succeeds() {
        let service = IndexService::new(Arc::new(FailingSource), Arc::new(UnavailableCache));

        let snapshot = service.get_index("KSE100").await;
        assert_eq!(snapshot, fallback_index());
    }
}
