//! Core domain types for the PSX market data API.
//!
//! This crate provides the fundamental types used throughout the service:
//! - `IndexSnapshot`: a point-in-time view of the KSE100 index
//! - `CompanyRecord`, `SectorRecord`: static reference rows
//! - `TradingStatus` and session classification based on UTC time
//! - Locale-aware number parsing for scraped text

pub mod error;
pub mod numeric;
pub mod session;
pub mod types;

pub use error::{CoreError, Result};
pub use numeric::{parse_number, try_parse_number};
pub use session::{is_open_at, status_at};
pub use types::{CompanyRecord, IndexSnapshot, SectorRecord, TradingStatus};
