//! Configuration validation
//!
//! This module provides validation logic for all configuration structures.

use super::models::*;
use tracing::debug;
use url::Url;

/// Validation trait for configuration structures
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating client configuration");

        let url = Url::parse(&self.base_url)
            .map_err(|e| format!("Base URL '{}' is invalid: {}", self.base_url, e))?;

        match url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "Base URL must use http:// or https:// scheme, got: {}",
                    scheme
                ));
            }
        }

        if self.api_version.trim_matches('/').is_empty() {
            return Err("API version cannot be empty".to_string());
        }

        if self.timeout == 0 {
            return Err("Client timeout must be greater than 0".to_string());
        }

        if self.timeout > 3600 {
            return Err("Client timeout should not exceed 1 hour".to_string());
        }

        Ok(())
    }
}

impl Validate for BatchSettings {
    fn validate(&self) -> Result<(), String> {
        debug!("Validating batch settings");

        if self.min_concurrency == 0 {
            return Err("Minimum concurrency must be at least 1".to_string());
        }

        if self.min_concurrency > self.max_concurrency {
            return Err(format!(
                "Minimum concurrency ({}) exceeds maximum concurrency ({})",
                self.min_concurrency, self.max_concurrency
            ));
        }

        if !self.accepts_concurrency(self.default_concurrency) {
            return Err(format!(
                "Default concurrency {} is outside {}..={}",
                self.default_concurrency, self.min_concurrency, self.max_concurrency
            ));
        }

        if self.default_delimiter.is_empty() {
            return Err("Default delimiter cannot be empty".to_string());
        }

        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(format!(
                "Page size must be between 1 and {}, got {}",
                MAX_PAGE_SIZE, self.page_size
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        if self.level.trim().is_empty() {
            return Err("Log level cannot be empty".to_string());
        }
        Ok(())
    }
}
