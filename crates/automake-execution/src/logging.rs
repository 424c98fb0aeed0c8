//! Global tracing subscriber setup.

use automake_core::config::LoggingConfig;
use automake_core::error::{AutomakeError, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Builds the filter from the configured directive, or from `RUST_LOG`
/// when the directive is empty.
pub fn env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if config.filter.trim().is_empty() {
        return Ok(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")));
    }
    EnvFilter::try_new(&config.filter)
        .map_err(|e| AutomakeError::config(format!("Invalid log filter '{}': {}", config.filter, e)))
}

/// Installs the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = env_filter(config)?;
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    installed.map_err(|e| AutomakeError::internal(format!("Failed to init logging: {}", e)))
}
