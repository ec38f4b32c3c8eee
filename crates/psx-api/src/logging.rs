//! Logging setup.

use tracing_subscriber::{fmt, EnvFilter};

/// Default filter when `RUST_LOG` is unset: info everywhere, debug for
/// the workspace crates.
const DEFAULT_FILTER: &str =
    "info,psx_api=debug,psx_service=debug,psx_scraper=debug,psx_cache=debug";

/// Install the global subscriber.
///
/// `RUST_ENV=production` switches to single-line JSON with flattened
/// event fields for log shippers; anything else gets compact
/// human-readable output.
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let builder = fmt().with_env_filter(filter).with_target(true);

    if production() {
        builder.json().flatten_event(true).init();
    } else {
        builder.compact().init();
    }
}

fn production() -> bool {
    std::env::var("RUST_ENV").map(|v| v == "production").unwrap_or(false)
}
