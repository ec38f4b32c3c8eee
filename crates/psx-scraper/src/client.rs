//! HTTP client for the PSX data portal.
//!
//! Performs the page retrieval with browser-like headers and a fixed
//! timeout. Never retries; retry policy, if any, belongs to the caller.

use crate::error::{ScrapeError, ScrapeResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

/// Default base URL of the PSX data portal.
pub const DEFAULT_BASE_URL: &str = "https://dps.psx.com.pk";

/// Path of the market-watch page relative to the base URL.
pub const MARKET_WATCH_PATH: &str = "/?page_id=30";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for fetching pages from the PSX data portal.
pub struct PsxClient {
    client: Client,
    base_url: String,
}

impl PsxClient {
    /// Create a new client against the default portal URL.
    pub fn new() -> ScrapeResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, DEFAULT_TIMEOUT)
    }

    /// Create a new client against a specific base URL.
    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> ScrapeResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36",
            ),
        );
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetch the market-watch page body.
    ///
    /// Any transport error or non-2xx response yields a `ScrapeError`.
    pub async fn fetch_market_watch(&self) -> ScrapeResult<String> {
        let url = format!("{}{}", self.base_url, MARKET_WATCH_PATH);
        debug!(url = %url, "Fetching market-watch page");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched market-watch page");
        Ok(body)
    }
}
