//! PSX market data API - entry point.

use anyhow::Result;
use clap::Parser;
use psx_api::config::CacheBackend;
use psx_api::{AppConfig, AppState};
use psx_cache::{MemoryCache, RedisCache, SnapshotCache};
use psx_scraper::{PsxClient, PsxScraper};
use psx_service::IndexService;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// PSX market data API server.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via PSX_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    psx_api::logging::init_logging();

    info!("Starting psx-api v{}", env!("CARGO_PKG_VERSION"));

    // Config path: CLI arg > PSX_CONFIG env var > default
    let config_path = args
        .config
        .or_else(|| std::env::var("PSX_CONFIG").ok())
        .unwrap_or_else(|| "config/default.toml".to_string());

    info!(config_path = %config_path, "Loading configuration");
    let config = AppConfig::load(&config_path)?;

    let cache: Arc<dyn SnapshotCache> = match config.cache.backend {
        CacheBackend::Redis => Arc::new(RedisCache::connect(&config.cache.redis_url).await),
        CacheBackend::Memory => Arc::new(MemoryCache::new()),
    };
    if !cache.is_available() {
        info!("Cache unavailable, requests will bypass it");
    }

    let client = PsxClient::with_base_url(
        config.scraper.base_url.as_str(),
        Duration::from_secs(config.scraper.timeout_secs),
    )?;
    let scraper = Arc::new(PsxScraper::new(client));

    let index_service = Arc::new(IndexService::with_ttl(
        scraper,
        cache,
        Duration::from_secs(config.cache.ttl_secs),
    ));

    let state = AppState::new(index_service);
    psx_api::run_server(&config, state).await?;

    Ok(())
}
