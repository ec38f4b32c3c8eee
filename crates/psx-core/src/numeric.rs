//! Locale-aware number parsing for scraped market data.
//!
//! The PSX data portal renders numbers with thousands separators and a
//! unicode minus sign (U+2212). Callers are responsible for stripping
//! parentheses and percent signs before invoking the parser.

use crate::error::{CoreError, Result};
use tracing::warn;

/// Parse a number from display text, stripping thousands separators and
/// normalizing the unicode minus sign.
///
/// Malformed input yields an error; use [`parse_number`] for the lenient
/// variant that defaults to `0.0`.
pub fn try_parse_number(text: &str) -> Result<f64> {
    let clean: String = text
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();

    clean
        .parse::<f64>()
        .map_err(|_| CoreError::NumberFormat(text.to_string()))
}

/// Lenient variant of [`try_parse_number`]: malformed input logs a warning
/// and yields `0.0` instead of failing the caller.
#[must_use]
pub fn parse_number(text: &str) -> f64 {
    match try_parse_number(text) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Failed to parse number, defaulting to 0.0");
            0.0
        }
    }
}
