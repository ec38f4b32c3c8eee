//! Seam between the pipeline and the scraping strategy.

use async_trait::async_trait;
use psx_scraper::{IndexFields, PsxScraper, ScrapeResult};

/// A live source of index fields.
///
/// The pipeline only sees this trait, so the HTML-scraping strategy can be
/// swapped without touching the cache or fallback logic.
#[async_trait]
pub trait IndexSource: Send + Sync {
    async fn fetch_index(&self, symbol: &str) -> ScrapeResult<IndexFields>;
}

#[async_trait]
impl IndexSource for PsxScraper {
    async fn fetch_index(&self, symbol: &str) -> ScrapeResult<IndexFields> {
        PsxScraper::fetch_index(self, symbol).await
    }
}
