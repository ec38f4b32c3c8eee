//! Scraper error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected HTTP status: {0}")]
    Status(u16),

    #[error("Index not found in page: {0}")]
    IndexNotFound(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
