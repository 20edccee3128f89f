//! Tracing subscriber setup

use crate::config::LoggingConfig;
use crate::utils::error::{PixelHubError, Result};
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber
///
/// `RUST_LOG` overrides the configured level when present. Logs go to stderr
/// so reports printed on stdout stay machine-readable.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            PixelHubError::Configuration(format!("Invalid log level '{}': {}", config.level, e))
        })?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false);

    let installed = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| {
        PixelHubError::Configuration(format!("Failed to install tracing subscriber: {}", e))
    })
}
