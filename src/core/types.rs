//! Domain types shared by the batch workflows and the remote service interface

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Deserialize `null` as the type's default (the server sends `null` for empty lists)
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Ordering of the image listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest uploads first
    #[default]
    DateDesc,
    /// Oldest uploads first
    DateAsc,
}

impl SortOrder {
    /// Query-string value understood by the server
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "date_desc",
            SortOrder::DateAsc => "date_asc",
        }
    }
}

/// How a tag list is applied to an image
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagMode {
    /// Replace the image's tags
    #[default]
    Set,
    /// Add to the image's tags
    Append,
}

impl TagMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TagMode::Set => "set",
            TagMode::Append => "append",
        }
    }
}

impl std::str::FromStr for TagMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "set" => Ok(TagMode::Set),
            "append" => Ok(TagMode::Append),
            other => Err(format!("Unknown tag mode: {}", other)),
        }
    }
}

/// One image as returned by the listing endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSummary {
    /// Image identifier
    #[serde(alias = "image_id")]
    pub id: String,
    /// Public URL
    #[serde(default)]
    pub url: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Upload timestamp
    #[serde(default)]
    pub upload_date: Option<DateTime<Utc>>,
    /// Current tags
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
}

/// One page of the image listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePage {
    /// Images on this page
    pub items: Vec<ImageSummary>,
    /// Size of the whole collection
    pub total: u64,
}

/// An item produced by a batch upload and held in memory by the caller
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadedItem {
    /// Image identifier assigned by the server
    pub image_id: String,
    /// Original file name
    #[serde(default)]
    pub filename: Option<String>,
    /// Public URL
    #[serde(default)]
    pub url: Option<String>,
    /// Local copy of the description
    #[serde(default)]
    pub description: String,
    /// Local copy of the tag list
    #[serde(default)]
    pub tags: Vec<String>,
}

impl UploadedItem {
    pub fn new(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            ..Default::default()
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Per-call parameters of bulk tag generation
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateParams {
    /// Prompt override; falls back to the configured default prompt
    pub prompt: Option<String>,
    /// Delimiter the model uses between tags; empty falls back to the configured default
    pub delimiter: String,
    /// Number of generation requests allowed in flight at once
    pub concurrency: usize,
    /// Forwarded to the service alongside the request
    pub mode: TagMode,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            prompt: None,
            delimiter: String::new(),
            concurrency: crate::config::default_concurrency(),
            mode: TagMode::Append,
        }
    }
}

impl GenerateParams {
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    pub fn with_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.delimiter = delimiter.into();
        self
    }
}

/// Body of a tag generation call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateTagsRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
    pub delimiter: String,
    pub mode: TagMode,
}

/// Result of a tag generation call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneratedTags {
    #[serde(default, deserialize_with = "null_as_default")]
    pub generated_tags: Vec<String>,
}

/// Body of a tag update call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagUpdate {
    pub tags: Vec<String>,
    pub mode: TagMode,
}

/// Per-item input of bulk save
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemInput {
    /// New description; empty skips the description step
    #[serde(default)]
    pub description: String,
    /// New tags; empty skips the tag step
    #[serde(default)]
    pub tags: Vec<String>,
    /// How the tags are applied
    #[serde(default)]
    pub tag_mode: TagMode,
}

impl ItemInput {
    pub fn new(description: impl Into<String>, tags: Vec<String>) -> Self {
        Self {
            description: description.into(),
            tags,
            tag_mode: TagMode::Set,
        }
    }
}

/// Which steps of a bulk save actually ran for one item
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSteps {
    pub description_updated: bool,
    pub tags_updated: bool,
}

/// Per-item status in a batch delete response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteStatus {
    Success,
    Failed,
}

/// One entry of a batch delete response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    pub image_id: String,
    pub status: DeleteStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response of the batch delete call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchDeleteResponse {
    pub total: usize,
    pub success: usize,
    pub failed: usize,
    #[serde(default, deserialize_with = "null_as_default")]
    pub results: Vec<DeleteResult>,
}
