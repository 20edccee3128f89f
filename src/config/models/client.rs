//! Remote client configuration

use super::*;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Connection settings for the PixelHub REST API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClientConfig {
    /// Server base URL, without the `/api/...` suffix
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// API version segment
    #[serde(default = "default_api_version")]
    pub api_version: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// User agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_version: default_api_version(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ClientConfig {
    /// Root of every API route, e.g. `http://localhost:8080/api/v1`
    pub fn api_root(&self) -> String {
        format!(
            "{}/api/{}",
            self.base_url.trim_end_matches('/'),
            self.api_version.trim_matches('/')
        )
    }

    /// Request timeout as a duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// Merge client configurations (other takes precedence over defaults)
    pub fn merge(mut self, other: Self) -> Self {
        if other.base_url != default_base_url() {
            self.base_url = other.base_url;
        }
        if other.api_version != default_api_version() {
            self.api_version = other.api_version;
        }
        if other.timeout != default_timeout() {
            self.timeout = other.timeout;
        }
        if other.user_agent != default_user_agent() {
            self.user_agent = other.user_agent;
        }
        self
    }
}
