//! Image routes

use super::client::PixelHubClient;
use super::types::{BatchDeleteRequest, DescriptionUpdate, ListImagesData};
use crate::config::MAX_PAGE_SIZE;
use crate::core::traits::ImageService;
use crate::core::types::{
    BatchDeleteResponse, GenerateTagsRequest, GeneratedTags, ImagePage, SortOrder, TagUpdate,
};
use crate::utils::error::Result;
use async_trait::async_trait;
use tracing::debug;

/// Listing limit used by the server when the requested one is out of range
const FALLBACK_LIMIT: u32 = 20;

/// Clamp listing parameters the way the server does
pub(crate) fn normalize_listing(page: u32, page_size: u32) -> (u32, u32) {
    let page = page.max(1);
    let limit = if (1..=MAX_PAGE_SIZE).contains(&page_size) {
        page_size
    } else {
        FALLBACK_LIMIT
    };
    (page, limit)
}

#[async_trait]
impl ImageService for PixelHubClient {
    async fn list_items(&self, page: u32, page_size: u32, sort: SortOrder) -> Result<ImagePage> {
        let (page, limit) = normalize_listing(page, page_size);
        let url = self.endpoint(&["images"])?;
        debug!("Listing images page {} (limit {})", page, limit);

        let request = self.http_client.get(url).query(&[
            ("page", page.to_string()),
            ("limit", limit.to_string()),
            ("sort", sort.as_str().to_string()),
        ]);
        let data: ListImagesData = self.execute_data(request).await?;
        debug!(
            "Page {} returned {} of {} images",
            data.current_page,
            data.images.len(),
            data.total
        );

        Ok(ImagePage {
            items: data.images,
            total: data.total,
        })
    }

    async fn list_all_item_ids(&self) -> Result<Vec<String>> {
        let mut ids = Vec::new();
        let mut page = 1;

        loop {
            let listing = self
                .list_items(page, self.page_size, SortOrder::DateDesc)
                .await?;
            let fetched = listing.items.len();
            ids.extend(listing.items.into_iter().map(|image| image.id));

            if fetched == 0 || ids.len() as u64 >= listing.total {
                break;
            }
            page += 1;
        }

        debug!("Enumerated {} image ids over {} pages", ids.len(), page);
        Ok(ids)
    }

    async fn generate_tags(
        &self,
        item_id: &str,
        request: &GenerateTagsRequest,
    ) -> Result<GeneratedTags> {
        let url = self.endpoint(&["images", item_id, "generate-tags"])?;
        debug!(item_id, "Requesting tag generation");
        self.execute_data(self.http_client.post(url).json(request))
            .await
    }

    async fn update_description(&self, item_id: &str, description: &str) -> Result<()> {
        let url = self.endpoint(&["images", item_id])?;
        let body = DescriptionUpdate { description };
        self.execute::<serde_json::Value>(self.http_client.put(url).json(&body))
            .await?;
        Ok(())
    }

    async fn update_tags(&self, item_id: &str, update: &TagUpdate) -> Result<()> {
        let url = self.endpoint(&["images", item_id, "tags"])?;
        self.execute::<serde_json::Value>(self.http_client.put(url).json(update))
            .await?;
        Ok(())
    }

    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteResponse> {
        let url = self.endpoint(&["images", "batch-delete"])?;
        let body = BatchDeleteRequest {
            image_ids: item_ids,
        };
        self.execute_data(self.http_client.post(url).json(&body))
            .await
    }
}
