//! Shared application state for axum handlers.

use psx_service::IndexService;
use std::sync::Arc;

/// Handler state: the index pipeline plus whatever each request needs.
///
/// Constructed once at startup; cheap to clone per request.
#[derive(Clone)]
pub struct AppState {
    pub index_service: Arc<IndexService>,
}

impl AppState {
    pub fn new(index_service: Arc<IndexService>) -> Self {
        Self { index_service }
    }
}
