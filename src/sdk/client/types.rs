//! Wire types of the PixelHub REST API

use crate::core::types::{ImageSummary, null_as_default};
use serde::{Deserialize, Serialize};

/// Envelope wrapping every API response
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiEnvelope<T> {
    pub code: u16,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }
}

/// `data` of `GET /images`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ListImagesData {
    pub total: u64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: Vec<ImageSummary>,
}

/// Body of `PUT /images/{id}`
#[derive(Debug, Serialize)]
pub(crate) struct DescriptionUpdate<'a> {
    pub description: &'a str,
}

/// Body of `POST /images/batch-delete`
#[derive(Debug, Serialize)]
pub(crate) struct BatchDeleteRequest<'a> {
    pub image_ids: &'a [String],
}
