//! Index data pipeline.
//!
//! Composes the cache, the scraper and the static fallback table into the
//! cache-aside chain behind `GET /api/v1/index`: cache lookup, then
//! fetch-and-extract, then the static snapshot. Every tier absorbs its own
//! failures; the pipeline never surfaces an error to its caller.

pub mod index_service;
pub mod source;

pub use index_service::{IndexService, CACHE_TTL};
pub use source::IndexSource;
