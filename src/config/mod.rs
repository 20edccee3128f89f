//! Configuration management for the batch client
//!
//! This module handles loading, validation, and management of all client configuration.

pub mod models;
pub mod validation;

pub use models::*;
pub use validation::Validate;

use crate::utils::error::{PixelHubError, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Remote API connection settings
    #[serde(default)]
    pub client: ClientConfig,
    /// Batch workflow settings
    #[serde(default)]
    pub batch: BatchSettings,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            PixelHubError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config = Self::from_yaml(&content)?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Parse and validate configuration from a YAML string
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(content)
            .map_err(|e| PixelHubError::Configuration(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from environment variables on top of the defaults
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let mut config = Self::default();
        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Override fields from `PIXELHUB_*` environment variables
    pub fn apply_env(&mut self) -> Result<()> {
        if let Ok(base_url) = env::var("PIXELHUB_BASE_URL") {
            self.client.base_url = base_url;
        }
        if let Ok(api_version) = env::var("PIXELHUB_API_VERSION") {
            self.client.api_version = api_version;
        }
        if let Ok(timeout) = env::var("PIXELHUB_TIMEOUT") {
            self.client.timeout = timeout
                .parse()
                .map_err(|e| PixelHubError::Configuration(format!("Invalid timeout: {}", e)))?;
        }
        if let Ok(concurrency) = env::var("PIXELHUB_DEFAULT_CONCURRENCY") {
            self.batch.default_concurrency = concurrency.parse().map_err(|e| {
                PixelHubError::Configuration(format!("Invalid default concurrency: {}", e))
            })?;
        }
        if let Ok(concurrency) = env::var("PIXELHUB_MAX_CONCURRENCY") {
            self.batch.max_concurrency = concurrency.parse().map_err(|e| {
                PixelHubError::Configuration(format!("Invalid max concurrency: {}", e))
            })?;
        }
        if let Ok(level) = env::var("PIXELHUB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(json) = env::var("PIXELHUB_LOG_JSON") {
            self.logging.json = json.parse().map_err(|e| {
                PixelHubError::Configuration(format!("Invalid log json flag: {}", e))
            })?;
        }

        debug!("Configuration overridden from environment variables");
        Ok(())
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.client
            .validate()
            .map_err(|e| PixelHubError::Configuration(format!("Client config error: {}", e)))?;

        self.batch
            .validate()
            .map_err(|e| PixelHubError::Configuration(format!("Batch config error: {}", e)))?;

        self.logging
            .validate()
            .map_err(|e| PixelHubError::Configuration(format!("Logging config error: {}", e)))?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            PixelHubError::Configuration(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
