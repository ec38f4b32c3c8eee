//! Fallback index snapshot.

use chrono::{TimeZone, Utc};
use once_cell::sync::Lazy;
use psx_core::{IndexSnapshot, TradingStatus};

/// The single index this service covers.
pub const INDEX_SYMBOL: &str = "KSE100";

/// Display name of the index.
pub const INDEX_NAME: &str = "Karachi Stock Exchange 100 Index";

/// Number of constituent stocks in the index basket.
pub const CONSTITUENT_COUNT: u32 = 100;

static FALLBACK_INDEX: Lazy<IndexSnapshot> = Lazy::new(|| IndexSnapshot {
    symbol: INDEX_SYMBOL.to_string(),
    name: INDEX_NAME.to_string(),
    value: 95234.50,
    change: 287.30,
    change_percent: 0.30,
    previous_close: 94947.20,
    open: 94950.20,
    high: 95450.75,
    low: 94875.30,
    volume: 245_000_000,
    market_cap: 8_547_000_000_000,
    year_high: 97500.00,
    year_low: 88250.00,
    ytd_change_percent: 12.5,
    constituent_count: CONSTITUENT_COUNT,
    trading_status: TradingStatus::Closed,
    // Capture time of the static table, deliberately not "now": fallback
    // responses stay distinguishable from live ones by their timestamp.
    timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 14, 30, 0).unwrap(),
    average_volume_30d: Some(235_000_000),
});

/// The static index snapshot served when every live tier fails.
#[must_use]
pub fn fallback_index() -> IndexSnapshot {
    FALLBACK_INDEX.clone()
}
