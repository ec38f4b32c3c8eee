//! Application configuration.

use crate::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which cache backend to construct at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Redis with native TTL enforcement. Degrades to always-miss when
    /// unreachable at startup.
    #[default]
    Redis,
    /// In-process HashMap with lazy expiry. No external dependency.
    Memory,
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen port. Default: 8000.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Allowed CORS origins. Default: the local frontend.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec!["http://localhost:3000".to_string()]
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            cors_origins: default_cors_origins(),
        }
    }
}

/// Cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub backend: CacheBackend,
    /// Redis connection URL. Default: local instance, db 0.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,
    /// Snapshot TTL in seconds. Default: 300.
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_redis_url() -> String {
    "redis://127.0.0.1:6379/0".to_string()
}

fn default_ttl_secs() -> u64 {
    300
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            redis_url: default_redis_url(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

/// Scraper settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Base URL of the PSX data portal.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds. Default: 10.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    psx_scraper::client::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub scraper: ScraperConfig,
}

impl AppConfig {
    /// Load from `config_path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(config_path: &str) -> ApiResult<Self> {
        if Path::new(config_path).exists() {
            Self::from_file(config_path)
        } else {
            tracing::warn!(path = %config_path, "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: &str) -> ApiResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| ApiError::Config(format!("Failed to parse config: {e}")))
    }
}
