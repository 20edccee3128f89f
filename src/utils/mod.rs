//! Utility modules for the batch client
//!
//! - **error**: crate error type and conversions
//! - **logging**: tracing subscriber setup
//! - **tags**: tag cleaning, splitting and merging

pub mod error; // Error handling
pub mod logging; // Logging
pub mod tags; // Tag list hygiene

pub use logging::init_logging;
pub use tags::{clean_tags, merge_tags, split_tags};

use uuid::Uuid;

/// Generate a unique batch ID
pub fn generate_batch_id() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate string to specified length with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}
