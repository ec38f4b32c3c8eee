//! Trading session classification based on UTC time.
//!
//! PSX regular trading hours are 9:30 – 15:30 PKT (UTC+5), approximated
//! here as a fixed 04:00 – 11:00 UTC window on weekdays. There is no
//! holiday calendar; public holidays are reported as open. This is a
//! documented limitation of the classifier, not a bug.

use crate::types::TradingStatus;
use chrono::{DateTime, Datelike, Timelike, Utc};

/// First UTC hour of the trading window (inclusive).
const OPEN_HOUR_UTC: u32 = 4;
/// Last UTC hour of the trading window (exclusive).
const CLOSE_HOUR_UTC: u32 = 11;

/// Check if the market is open at a given UTC datetime.
///
/// Open iff Monday – Friday and the hour falls within the fixed window.
#[must_use]
pub fn is_open_at(dt: DateTime<Utc>) -> bool {
    let is_weekday = dt.weekday().num_days_from_monday() < 5;
    let in_window = (OPEN_HOUR_UTC..CLOSE_HOUR_UTC).contains(&dt.hour());
    is_weekday && in_window
}

/// Classify the trading status at a given UTC datetime.
#[must_use]
pub fn status_at(dt: DateTime<Utc>) -> TradingStatus {
    if is_open_at(dt) {
        TradingStatus::Open
    } else {
        TradingStatus::Closed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
    }

    #[test]
    fn test_weekend_always_closed() {
        // Saturday and Sunday, every hour
        for hour in 0..24 {
            assert!(!is_open_at(utc(2024, 1, 13, hour, 0)), "Sat {hour}:00");
            assert!(!is_open_at(utc(2024, 1, 14, hour, 0)), "Sun {hour}:00");
        }
    }

    #[test]
    fn test_weekday_inside_window_is_open() {
        // Wednesday 2024-01-17
        assert!(is_open_at(utc(2024, 1, 17, 4, 0)));
        assert!(is_open_at(utc(2024, 1, 17, 7, 30)));
        assert!(is_open_at(utc(2024, 1, 17, 10, 59)));
    }

    #[test]
    fn test_weekday_window_boundaries() {
        // Just before open and at close
        assert!(!is_open_at(utc(2024, 1, 17, 3, 59)));
        assert!(!is_open_at(utc(2024, 1, 17, 11, 0)));
        assert!(!is_open_at(utc(2024, 1, 17, 23, 0)));
    }

    #[test]
    fn test_status_at_maps_to_enum() {
        assert_eq!(status_at(utc(2024, 1, 17, 5, 0)), TradingStatus::Open);
        assert_eq!(status_at(utc(2024, 1, 13, 5, 0)), TradingStatus::Closed);
    }
}
