//! HTTP API for KSE100 reference data.
//!
//! Routes, query validation, error envelopes and process configuration.
//! The index endpoint is served by the `psx-service` pipeline; companies
//! and sectors come straight from the `psx-data` tables.

pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod state;

pub use config::AppConfig;
pub use error::{ApiError, ApiResult};
pub use server::{create_router, run_server};
pub use state::AppState;
