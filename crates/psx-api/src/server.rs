//! HTTP routes and handlers.

use std::cmp::Ordering;
use std::net::SocketAddr;

use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use chrono::Utc;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use psx_core::{CompanyRecord, IndexSnapshot, SectorRecord};
use psx_data::index::INDEX_SYMBOL;

/// Sortable company fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum SortField {
    #[default]
    Rank,
    Symbol,
    MarketCap,
    Price,
    ChangePercent,
    PeRatio,
    DividendYield,
    Volume,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
enum SortOrder {
    #[default]
    Asc,
    Desc,
}

/// Query extractor that rejects with the shared JSON error envelope
/// instead of axum's plain-text default.
struct ApiQuery<T>(T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::BadRequest(rejection.body_text())),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TopCompaniesQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    sort_by: SortField,
    #[serde(default)]
    sort_order: SortOrder,
    sector: Option<String>,
}

fn default_limit() -> usize {
    30
}

#[derive(Debug, Deserialize)]
struct HistoricalQuery {
    #[serde(default = "default_days")]
    days: u32,
}

fn default_days() -> u32 {
    30
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/v1/health", get(health))
        .route("/api/v1/ping", get(ping))
        .route("/api/v1/index", get(get_index))
        .route("/api/v1/index/historical", get(get_historical_index))
        .route("/api/v1/companies/top", get(get_top_companies))
        .route("/api/v1/sectors", get(get_sectors))
        .route("/api/v1/sectors/{sector_name}/companies", get(get_sector_companies))
        .fallback(not_found)
        .with_state(state)
}

/// Service information.
async fn root() -> Json<Value> {
    Json(json!({
        "name": "PSX Market Data API",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "operational",
        "environment": environment(),
    }))
}

/// Health check for container orchestration.
async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": Utc::now(),
        "service": "psx-api",
        "environment": environment(),
    }))
}

async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}

fn environment() -> String {
    std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string())
}

/// Current KSE100 snapshot via the pipeline. The pipeline absorbs every
/// upstream failure, so this handler cannot fail.
async fn get_index(State(state): State<AppState>) -> Json<IndexSnapshot> {
    Json(state.index_service.get_index(INDEX_SYMBOL).await)
}

/// Historical data is not implemented; signal that explicitly rather than
/// returning partial data.
async fn get_historical_index(
    ApiQuery(query): ApiQuery<HistoricalQuery>,
) -> ApiResult<Json<Value>> {
    if !(1..=365).contains(&query.days) {
        return Err(ApiError::BadRequest(format!(
            "days must be between 1 and 365, got {}",
            query.days
        )));
    }
    Err(ApiError::NotImplemented(
        "Historical index data is not available yet".to_string(),
    ))
}

/// Top KSE100 companies: filter by sector, sort, then limit.
async fn get_top_companies(
    ApiQuery(query): ApiQuery<TopCompaniesQuery>,
) -> ApiResult<Json<Vec<CompanyRecord>>> {
    if !(1..=100).contains(&query.limit) {
        return Err(ApiError::BadRequest(format!(
            "limit must be between 1 and 100, got {}",
            query.limit
        )));
    }

    let mut companies: Vec<CompanyRecord> = psx_data::all_companies()
        .iter()
        .filter(|c| {
            query
                .sector
                .as_deref()
                .map_or(true, |sector| c.sector == sector)
        })
        .cloned()
        .collect();

    companies.sort_by(|a, b| {
        let ordering = compare_companies(a, b, query.sort_by);
        match query.sort_order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    companies.truncate(query.limit);

    Ok(Json(companies))
}

fn compare_companies(a: &CompanyRecord, b: &CompanyRecord, field: SortField) -> Ordering {
    match field {
        SortField::Rank => a.rank.cmp(&b.rank),
        SortField::Symbol => a.symbol.cmp(&b.symbol),
        SortField::MarketCap => a.market_cap.cmp(&b.market_cap),
        SortField::Price => compare_f64(a.price, b.price),
        SortField::ChangePercent => compare_f64(a.change_percent, b.change_percent),
        SortField::PeRatio => compare_f64(a.pe_ratio, b.pe_ratio),
        SortField::DividendYield => compare_f64(a.dividend_yield, b.dividend_yield),
        SortField::Volume => a.volume.cmp(&b.volume),
    }
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// KSE100 sector composition.
async fn get_sectors() -> Json<Vec<SectorRecord>> {
    Json(psx_data::all_sectors().to_vec())
}

/// Companies within a sector. A sector matching zero records is a 404,
/// distinct from a server error.
async fn get_sector_companies(
    Path(sector_name): Path<String>,
) -> ApiResult<Json<Vec<CompanyRecord>>> {
    let companies = psx_data::companies_in_sector(&sector_name);
    if companies.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No companies found for sector: {sector_name}"
        )));
    }
    Ok(Json(companies))
}

async fn not_found(uri: axum::http::Uri) -> ApiError {
    ApiError::NotFound(format!("The endpoint {} does not exist", uri.path()))
}

/// Build the CORS layer from configured origins; origins that fail header
/// validation are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Skipping invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Bind and serve the API.
pub async fn run_server(config: &AppConfig, state: AppState) -> ApiResult<()> {
    let app = create_router(state).layer(cors_layer(&config.server.cors_origins));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    info!(port = config.server.port, "Starting API server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use psx_cache::MemoryCache;
    use psx_scraper::{IndexFields, ScrapeError, ScrapeResult};
    use psx_service::{IndexService, IndexSource};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Source that never produces live data; the pipeline serves the
    /// static fallback, which keeps handler tests deterministic.
    struct OfflineSource;

    #[async_trait]
    impl IndexSource for OfflineSource {
        async fn fetch_index(&self, symbol: &str) -> ScrapeResult<IndexFields> {
            Err(ScrapeError::IndexNotFound(symbol.to_string()))
        }
    }

    fn test_router() -> Router {
        let service = IndexService::new(Arc::new(OfflineSource), Arc::new(MemoryCache::new()));
        create_router(AppState::new(Arc::new(service)))
    }

    async fn get_json(router: Router, uri: &str) -> (StatusCode, Value) {
        let response = router
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    #[tokio::test]
    async fn test_ping() {
        let (status, body) = get_json(test_router(), "/api/v1/ping").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "pong");
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(test_router(), "/api/v1/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_index_serves_snapshot() {
        let (status, body) = get_json(test_router(), "/api/v1/index").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["symbol"], "KSE100");
        assert_eq!(body["value"], 95234.50);
        assert_eq!(body["constituent_count"], 100);
        assert_eq!(body["trading_status"], "closed");
    }

    #[tokio::test]
    async fn test_historical_is_not_implemented() {
        let (status, body) = get_json(test_router(), "/api/v1/index/historical?days=30").await;
        assert_eq!(status, StatusCode::NOT_IMPLEMENTED);
        assert_eq!(body["error"], "Not Implemented");
    }

    #[tokio::test]
    async fn test_historical_days_out_of_range() {
        let (status, _) = get_json(test_router(), "/api/v1/index/historical?days=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = get_json(test_router(), "/api/v1/index/historical?days=400").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_top_companies_defaults() {
        let (status, body) = get_json(test_router(), "/api/v1/companies/top").await;
        assert_eq!(status, StatusCode::OK);
        let companies = body.as_array().unwrap();
        assert_eq!(companies.len(), 15);
        // Default sort is rank ascending.
        assert_eq!(companies[0]["symbol"], "HBL");
    }

    #[tokio::test]
    async fn test_top_companies_sorted_by_market_cap_desc() {
        let (status, body) = get_json(
            test_router(),
            "/api/v1/companies/top?limit=3&sort_by=market_cap&sort_order=desc",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let companies = body.as_array().unwrap();
        assert_eq!(companies.len(), 3);
        assert_eq!(companies[0]["symbol"], "OGDC");
        assert_eq!(companies[1]["symbol"], "PSO");
    }

    #[tokio::test]
    async fn test_top_companies_sector_filter_applies_before_limit() {
        let (status, body) = get_json(
            test_router(),
            "/api/v1/companies/top?limit=10&sector=Cement",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let companies = body.as_array().unwrap();
        assert_eq!(companies.len(), 2);
        assert!(companies.iter().all(|c| c["sector"] == "Cement"));
    }

    #[tokio::test]
    async fn test_top_companies_limit_out_of_range() {
        let (status, body) = get_json(test_router(), "/api/v1/companies/top?limit=0").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");

        let (status, _) = get_json(test_router(), "/api/v1/companies/top?limit=101").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_query_values_get_json_envelope() {
        let (status, body) =
            get_json(test_router(), "/api/v1/companies/top?sort_by=bogus").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");

        let (status, body) = get_json(test_router(), "/api/v1/companies/top?limit=abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");

        let (status, body) =
            get_json(test_router(), "/api/v1/index/historical?days=soon").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Bad Request");
    }

    #[tokio::test]
    async fn test_sectors() {
        let (status, body) = get_json(test_router(), "/api/v1/sectors").await;
        assert_eq!(status, StatusCode::OK);
        let sectors = body.as_array().unwrap();
        assert_eq!(sectors.len(), 10);
        assert_eq!(sectors[0]["name"], "Commercial Banks");
    }

    #[tokio::test]
    async fn test_sector_companies() {
        let (status, body) =
            get_json(test_router(), "/api/v1/sectors/Fertilizer/companies").await;
        assert_eq!(status, StatusCode::OK);
        let companies = body.as_array().unwrap();
        assert_eq!(companies.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_sector_is_404_not_500() {
        let (status, body) = get_json(test_router(), "/api/v1/sectors/Textiles/companies").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
    }

    #[tokio::test]
    async fn test_unknown_route_has_json_envelope() {
        let (status, body) = get_json(test_router(), "/api/v1/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Not Found");
    }
}
