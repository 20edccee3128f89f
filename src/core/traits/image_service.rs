//! Remote image service trait
//!
//! The batch workflows only ever talk to the remote collection through this
//! interface. Every method is one suspension point: a single remote call
//! (or, for [`ImageService::list_all_item_ids`], one logical enumeration).

use crate::core::types::{
    BatchDeleteResponse, GenerateTagsRequest, GeneratedTags, ImagePage, SortOrder, TagUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Remote image collection operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Fetch one page of the collection
    async fn list_items(&self, page: u32, page_size: u32, sort: SortOrder) -> Result<ImagePage>;

    /// Enumerate every identifier in the collection, in listing order
    async fn list_all_item_ids(&self) -> Result<Vec<String>>;

    /// Ask the service to generate tags for one image
    async fn generate_tags(
        &self,
        item_id: &str,
        request: &GenerateTagsRequest,
    ) -> Result<GeneratedTags>;

    /// Replace an image's description
    async fn update_description(&self, item_id: &str, description: &str) -> Result<()>;

    /// Set or append an image's tags
    async fn update_tags(&self, item_id: &str, update: &TagUpdate) -> Result<()>;

    /// Delete many images in one call; the response carries a per-item breakdown
    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteResponse>;
}

#[async_trait]
impl<T: ImageService + ?Sized> ImageService for std::sync::Arc<T> {
    async fn list_items(&self, page: u32, page_size: u32, sort: SortOrder) -> Result<ImagePage> {
        (**self).list_items(page, page_size, sort).await
    }

    async fn list_all_item_ids(&self) -> Result<Vec<String>> {
        (**self).list_all_item_ids().await
    }

    async fn generate_tags(
        &self,
        item_id: &str,
        request: &GenerateTagsRequest,
    ) -> Result<GeneratedTags> {
        (**self).generate_tags(item_id, request).await
    }

    async fn update_description(&self, item_id: &str, description: &str) -> Result<()> {
        (**self).update_description(item_id, description).await
    }

    async fn update_tags(&self, item_id: &str, update: &TagUpdate) -> Result<()> {
        (**self).update_tags(item_id, update).await
    }

    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteResponse> {
        (**self).batch_delete(item_ids).await
    }
}
