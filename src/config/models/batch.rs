//! Batch workflow configuration

use super::*;
use serde::{Deserialize, Serialize};

/// Settings shared by the batch workflows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BatchSettings {
    /// Concurrency used when the caller does not pick one
    #[serde(default = "default_concurrency")]
    pub default_concurrency: usize,
    /// Lowest concurrency a caller may request
    #[serde(default = "default_min_concurrency")]
    pub min_concurrency: usize,
    /// Highest concurrency a caller may request
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
    /// Delimiter used when a generation request leaves it empty
    #[serde(default = "default_delimiter")]
    pub default_delimiter: String,
    /// Prompt used when a generation request has none; the server default applies when unset
    #[serde(default)]
    pub default_prompt: Option<String>,
    /// Page size when enumerating the whole collection
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            default_concurrency: default_concurrency(),
            min_concurrency: default_min_concurrency(),
            max_concurrency: default_max_concurrency(),
            default_delimiter: default_delimiter(),
            default_prompt: None,
            page_size: default_page_size(),
        }
    }
}

impl BatchSettings {
    /// Whether `concurrency` lies within the configured bounds
    pub fn accepts_concurrency(&self, concurrency: usize) -> bool {
        (self.min_concurrency..=self.max_concurrency).contains(&concurrency)
    }
}
