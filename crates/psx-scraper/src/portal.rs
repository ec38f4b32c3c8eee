//! High-level scraper combining fetch and extraction.

use crate::client::PsxClient;
use crate::error::ScrapeResult;
use crate::extract::{extract_index, IndexFields};
use tracing::info;

/// Fetches the market-watch page and extracts index fields from it.
///
/// Holds the process-wide HTTP client; construct once at startup and share.
pub struct PsxScraper {
    client: PsxClient,
}

impl PsxScraper {
    pub fn new(client: PsxClient) -> Self {
        Self { client }
    }

    /// Fetch and extract the current fields for `symbol`.
    pub async fn fetch_index(&self, symbol: &str) -> ScrapeResult<IndexFields> {
        let body = self.client.fetch_market_watch().await?;
        let fields = extract_index(&body, symbol)?;
        info!(symbol = %symbol, value = fields.value, "Extracted index from portal");
        Ok(fields)
    }
}
