//! Fetching and extraction of KSE100 index data from the PSX data portal.
//!
//! The portal (dps.psx.com.pk) has no public API; index data is extracted
//! from the market-watch page by structural markers. Extraction is brittle
//! by nature and is isolated behind [`extract::extract_index`] so the
//! parsing strategy can be swapped without touching callers.

pub mod client;
pub mod error;
pub mod extract;
pub mod portal;

pub use client::PsxClient;
pub use error::{ScrapeError, ScrapeResult};
pub use extract::{extract_index, IndexFields};
pub use portal::PsxScraper;
