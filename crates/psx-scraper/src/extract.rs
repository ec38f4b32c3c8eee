//! Index extraction from the market-watch page.
//!
//! Page structure on dps.psx.com.pk:
//! - Summary slider: `div.topIndices__item` with `__name`, `__val`,
//!   `__change` and `__changep` children, one item per index.
//! - Detailed stats: `div.tabs__panel[data-name=<SYMBOL>]` containing
//!   `div.stats_item` rows of `stats_label` / `stats_value` pairs.
//!
//! Extraction either returns a fully-formed [`IndexFields`] or
//! `IndexNotFound`; missing optional fields are logged at debug level and
//! left unset, never raised.

use crate::error::{ScrapeError, ScrapeResult};
use chrono::{DateTime, Utc};
use psx_core::{numeric, session, TradingStatus};
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// Fields extracted for a single index.
///
/// `value`, `change`, `change_percent` and `previous_close` are always
/// populated; detail-panel fields stay `None` when the panel is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexFields {
    pub symbol: String,
    pub value: f64,
    pub change: f64,
    pub change_percent: f64,
    pub previous_close: f64,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub volume: Option<i64>,
    pub year_change_percent: Option<f64>,
    pub ytd_change_percent: Option<f64>,
    pub year_high: Option<f64>,
    pub year_low: Option<f64>,
    /// Derived from wall-clock time at extraction, not from page content.
    pub trading_status: TradingStatus,
    pub timestamp: DateTime<Utc>,
}

fn selector(css: &str) -> ScrapeResult<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("Bad selector {css:?}: {e}")))
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Extract index fields for `symbol` from the market-watch page body.
///
/// The summary block whose name equals `symbol` (after trimming) is
/// required; the detailed stats panel is optional and only widens the
/// field set when present.
pub fn extract_index(html: &str, symbol: &str) -> ScrapeResult<IndexFields> {
    let document = Html::parse_document(html);

    let item_sel = selector("div.topIndices__item")?;
    let name_sel = selector("div.topIndices__item__name")?;
    let value_sel = selector("div.topIndices__item__val")?;
    let change_sel = selector("div.topIndices__item__change")?;
    let change_pct_sel = selector("div.topIndices__item__changep")?;

    let block = document
        .select(&item_sel)
        .find(|item| {
            item.select(&name_sel)
                .next()
                .is_some_and(|name| element_text(name) == symbol)
        })
        .ok_or_else(|| ScrapeError::IndexNotFound(symbol.to_string()))?;

    let value_text = block
        .select(&value_sel)
        .next()
        .map(element_text)
        .ok_or_else(|| ScrapeError::IndexNotFound(symbol.to_string()))?;
    let value = numeric::parse_number(&value_text);

    let change = block
        .select(&change_sel)
        .next()
        .map(|e| numeric::parse_number(&element_text(e)))
        .unwrap_or(0.0);

    // Change percent is rendered as "(0.30%)"; strip the decoration first.
    let change_percent = block
        .select(&change_pct_sel)
        .next()
        .map(|e| {
            let text = element_text(e)
                .replace(['(', ')', '%'], "")
                .trim()
                .to_string();
            numeric::parse_number(&text)
        })
        .unwrap_or(0.0);

    let previous_close = round2(value - change);

    let now = Utc::now();
    let mut fields = IndexFields {
        symbol: symbol.to_string(),
        value,
        change,
        change_percent,
        previous_close,
        high: None,
        low: None,
        volume: None,
        year_change_percent: None,
        ytd_change_percent: None,
        year_high: None,
        year_low: None,
        trading_status: session::status_at(now),
        timestamp: now,
    };

    apply_detail_panel(&document, symbol, &mut fields)?;

    Ok(fields)
}

/// Scan the detailed stats panel for `symbol`, mapping known labels onto
/// `fields`. Panel values win over summary-derived ones. A missing panel
/// is not an error.
fn apply_detail_panel(
    document: &Html,
    symbol: &str,
    fields: &mut IndexFields,
) -> ScrapeResult<()> {
    let panel_sel = selector(&format!("div.tabs__panel[data-name=\"{symbol}\"]"))?;
    let Some(panel) = document.select(&panel_sel).next() else {
        debug!(symbol = %symbol, "No detailed stats panel in page");
        return Ok(());
    };

    let item_sel = selector("div.stats_item")?;
    let label_sel = selector("div.stats_label")?;
    let value_sel = selector("div.stats_value")?;

    for item in panel.select(&item_sel) {
        let (Some(label_el), Some(value_el)) = (
            item.select(&label_sel).next(),
            item.select(&value_sel).next(),
        ) else {
            continue;
        };

        let label = element_text(label_el).to_lowercase();
        let value_text = element_text(value_el);

        match label.as_str() {
            "high" => fields.high = Some(numeric::parse_number(&value_text)),
            "low" => fields.low = Some(numeric::parse_number(&value_text)),
            "volume" => fields.volume = Some(numeric::parse_number(&value_text) as i64),
            "previous close" => fields.previous_close = numeric::parse_number(&value_text),
            "1-year change" => {
                let text = value_text.replace('%', "");
                fields.year_change_percent = Some(numeric::parse_number(text.trim()));
            }
            "ytd change" => {
                let text = value_text.replace('%', "");
                fields.ytd_change_percent = Some(numeric::parse_number(text.trim()));
            }
            "52-week range" => {
                // Rendered as "85,120.90 — 169,988.62" with an em-dash.
                let parts: Vec<&str> = value_text.split('\u{2014}').collect();
                if parts.len() == 2 {
                    fields.year_low = Some(numeric::parse_number(parts[0]));
                    fields.year_high = Some(numeric::parse_number(parts[1]));
                } else {
                    debug!(text = %value_text, "Unexpected 52-week range format");
                }
            }
            _ => {
                debug!(label = %label, "Ignoring unknown stats label");
            }
        }
    }

    Ok(())
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
