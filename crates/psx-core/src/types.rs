//! Domain types shared across the service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the market session is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradingStatus {
    Open,
    Closed,
}

impl std::fmt::Display for TradingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "open"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// A point-in-time view of the KSE100 index.
///
/// Constructed fresh on every successful fetch-and-parse, or drawn verbatim
/// from the static fallback table. Never mutated after construction; the next
/// fetch supersedes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexSnapshot {
    /// Index symbol (e.g., "KSE100").
    pub symbol: String,
    /// Full index name.
    pub name: String,
    /// Current index value in points.
    pub value: f64,
    /// Absolute change from previous close.
    pub change: f64,
    /// Percentage change from previous close.
    pub change_percent: f64,
    /// Previous trading day close. Invariant: `value - change == previous_close`
    /// within rounding.
    pub previous_close: f64,
    /// Today's opening value.
    pub open: f64,
    /// Today's highest value.
    pub high: f64,
    /// Today's lowest value.
    pub low: f64,
    /// Total trading volume.
    pub volume: i64,
    /// Total market capitalization in PKR.
    pub market_cap: i64,
    /// 52-week high.
    pub year_high: f64,
    /// 52-week low.
    pub year_low: f64,
    /// Year-to-date change percentage.
    pub ytd_change_percent: f64,
    /// Number of constituent stocks.
    pub constituent_count: u32,
    /// Derived from wall-clock time at fetch, not from fetched content.
    pub trading_status: TradingStatus,
    /// Generation timestamp.
    pub timestamp: DateTime<Utc>,
    /// 30-day average volume, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_volume_30d: Option<i64>,
}

/// A row in the top-companies reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Rank by market capitalization.
    pub rank: u32,
    pub symbol: String,
    pub name: String,
    /// Loose string reference into `SectorRecord::name`.
    pub sector: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: f64,
    /// Market capitalization in PKR.
    pub market_cap: i64,
    pub pe_ratio: f64,
    pub dividend_yield: f64,
    pub eps: f64,
    pub volume: i64,
    pub year_high: f64,
    pub year_low: f64,
}

/// A row in the sector composition reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorRecord {
    pub id: u32,
    pub name: String,
    /// Market capitalization in PKR.
    pub market_cap: i64,
    /// Weight in the KSE100 index (%).
    pub weight_percent: f64,
    /// Number of companies in the sector.
    pub companies_count: u32,
    /// Daily change percentage.
    pub day_change_percent: f64,
    /// Average P/E ratio for the sector.
    pub avg_pe_ratio: f64,
    /// Display color for charts.
    pub color: String,
}
