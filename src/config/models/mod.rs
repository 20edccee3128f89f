//! Configuration data models
//!
//! This module defines all configuration structures used by the batch client.

pub mod batch;
pub mod client;
pub mod logging;

// Re-export all configuration types
pub use batch::*;
pub use client::*;
pub use logging::*;

/// Default PixelHub base URL
pub fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

/// Default API version segment
pub fn default_api_version() -> String {
    "v1".to_string()
}

/// Default timeout in seconds
pub fn default_timeout() -> u64 {
    30
}

/// Default user agent sent with every request
pub fn default_user_agent() -> String {
    format!("pixelhub-batch/{}", env!("CARGO_PKG_VERSION"))
}

/// Default number of concurrent tag generation requests
pub fn default_concurrency() -> usize {
    3
}

/// Lowest accepted concurrency
pub fn default_min_concurrency() -> usize {
    1
}

/// Highest accepted concurrency
pub fn default_max_concurrency() -> usize {
    10
}

/// Default tag delimiter for generated tags
pub fn default_delimiter() -> String {
    ",".to_string()
}

/// Page size used when walking the full image listing
pub fn default_page_size() -> u32 {
    100
}

/// Largest page the server will return
pub const MAX_PAGE_SIZE: u32 = 100;

/// Default log level
pub fn default_log_level() -> String {
    "info".to_string()
}
