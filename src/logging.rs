//! Tracing subscriber setup

use anyhow::{Result, anyhow};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// `verbose` raises the configured level to `debug`.
pub fn init_tracing(config: &LoggingConfig, verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directive(config, verbose)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    let installed = match config.format.as_str() {
        "json" => builder.json().try_init(),
        _ => builder.try_init(),
    };
    installed.map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))
}

fn directive(config: &LoggingConfig, verbose: bool) -> String {
    let level = if verbose && !matches!(config.level.as_str(), "debug" | "trace") {
        "debug"
    } else {
        config.level.as_str()
    };
    // Request spans from tower-http never go past info, nor past the app
    let tower_http = if matches!(level, "error" | "warn") {
        level
    } else {
        "info"
    };
    format!("{level},tower_http={tower_http}")
}
