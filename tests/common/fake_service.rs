//! In-memory image service
//!
//! Behaves like a small PixelHub server: a paginated collection, per-call
//! latency, scripted failures, and counters for calls and in-flight requests.

use async_trait::async_trait;
use pixelhub_batch::{
    BatchDeleteResponse, DeleteResult, DeleteStatus, GenerateTagsRequest, GeneratedTags,
    ImagePage, ImageService, ImageSummary, PixelHubError, Result, SortOrder, TagMode, TagUpdate,
};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Page size used by `list_all_item_ids`
pub const FAKE_PAGE_SIZE: u32 = 20;

/// A stored image
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    pub id: String,
    pub description: String,
    pub tags: Vec<String>,
}

/// Fake PixelHub backend
#[derive(Debug, Default)]
pub struct FakeImageService {
    images: Mutex<Vec<StoredImage>>,
    latency: Duration,
    latency_by_id: HashMap<String, Duration>,
    failures: HashMap<(&'static str, String), String>,
    calls: Mutex<HashMap<&'static str, usize>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FakeImageService {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Collection of `n` images named `img_000`, `img_001`, ...
    pub fn with_images(n: usize) -> Self {
        let images = (0..n)
            .map(|i| StoredImage {
                id: format!("img_{:03}", i),
                description: String::new(),
                tags: Vec::new(),
            })
            .collect();
        Self {
            images: Mutex::new(images),
            ..Self::default()
        }
    }

    /// Every call sleeps this long before answering
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Calls about `id` sleep this long instead
    pub fn with_latency_for(mut self, id: impl Into<String>, latency: Duration) -> Self {
        self.latency_by_id.insert(id.into(), latency);
        self
    }

    /// Make `operation` fail for `id`; the message `"timeout"` yields a timeout error
    pub fn failing(
        mut self,
        operation: &'static str,
        id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.failures.insert((operation, id.into()), message.into());
        self
    }

    /// Number of calls made to `operation`
    pub fn calls(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .get(operation)
            .copied()
            .unwrap_or(0)
    }

    /// Total number of calls across every operation
    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().values().sum()
    }

    /// Highest number of requests observed in flight at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    pub fn image(&self, id: &str) -> Option<StoredImage> {
        self.images
            .lock()
            .unwrap()
            .iter()
            .find(|image| image.id == id)
            .cloned()
    }

    pub fn ids(&self) -> Vec<String> {
        self.images
            .lock()
            .unwrap()
            .iter()
            .map(|image| image.id.clone())
            .collect()
    }

    fn record(&self, operation: &'static str) {
        *self.calls.lock().unwrap().entry(operation).or_insert(0) += 1;
    }

    fn scripted_failure(&self, operation: &'static str, id: &str) -> Option<PixelHubError> {
        self.failures
            .get(&(operation, id.to_string()))
            .map(|message| match message.as_str() {
                "timeout" => PixelHubError::timeout("timeout"),
                other => PixelHubError::remote_call(other),
            })
    }

    /// Simulate one remote round trip for `id`
    async fn round_trip(&self, id: &str) {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = self.latency_by_id.get(id).copied().unwrap_or(self.latency);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ImageService for FakeImageService {
    async fn list_items(&self, page: u32, page_size: u32, sort: SortOrder) -> Result<ImagePage> {
        self.record("list_items");
        self.round_trip("").await;
        if let Some(error) = self.scripted_failure("list_items", &page.to_string()) {
            return Err(error);
        }

        let images = self.images.lock().unwrap();
        let mut ordered: Vec<&StoredImage> = images.iter().collect();
        if sort == SortOrder::DateAsc {
            ordered.reverse();
        }

        let page = page.max(1) as usize;
        let size = page_size.max(1) as usize;
        let items = ordered
            .into_iter()
            .skip((page - 1) * size)
            .take(size)
            .map(|image| ImageSummary {
                id: image.id.clone(),
                url: format!("http://fake/{}.png", image.id),
                description: image.description.clone(),
                upload_date: None,
                tags: image.tags.clone(),
            })
            .collect();

        Ok(ImagePage {
            items,
            total: images.len() as u64,
        })
    }

    async fn list_all_item_ids(&self) -> Result<Vec<String>> {
        self.record("list_all_item_ids");
        let mut ids = Vec::new();
        let mut page = 1;
        loop {
            let listing = self
                .list_items(page, FAKE_PAGE_SIZE, SortOrder::DateDesc)
                .await?;
            if listing.items.is_empty() {
                break;
            }
            ids.extend(listing.items.into_iter().map(|image| image.id));
            if ids.len() as u64 >= listing.total {
                break;
            }
            page += 1;
        }
        Ok(ids)
    }

    async fn generate_tags(
        &self,
        item_id: &str,
        request: &GenerateTagsRequest,
    ) -> Result<GeneratedTags> {
        self.record("generate_tags");
        self.round_trip(item_id).await;
        if let Some(error) = self.scripted_failure("generate_tags", item_id) {
            return Err(error);
        }

        let generated: Vec<String> = vec![format!("tag-{}", item_id), "photo".to_string()];
        let mut images = self.images.lock().unwrap();
        let image = images
            .iter_mut()
            .find(|image| image.id == item_id)
            .ok_or_else(|| PixelHubError::api(404, "Image not found"))?;
        match request.mode {
            TagMode::Set => image.tags = generated.clone(),
            TagMode::Append => image.tags.extend(generated.iter().cloned()),
        }

        Ok(GeneratedTags {
            generated_tags: generated,
        })
    }

    async fn update_description(&self, item_id: &str, description: &str) -> Result<()> {
        self.record("update_description");
        self.round_trip(item_id).await;
        if let Some(error) = self.scripted_failure("update_description", item_id) {
            return Err(error);
        }

        let mut images = self.images.lock().unwrap();
        let image = images
            .iter_mut()
            .find(|image| image.id == item_id)
            .ok_or_else(|| PixelHubError::api(404, "Image not found"))?;
        image.description = description.to_string();
        Ok(())
    }

    async fn update_tags(&self, item_id: &str, update: &TagUpdate) -> Result<()> {
        self.record("update_tags");
        self.round_trip(item_id).await;
        if let Some(error) = self.scripted_failure("update_tags", item_id) {
            return Err(error);
        }

        let mut images = self.images.lock().unwrap();
        let image = images
            .iter_mut()
            .find(|image| image.id == item_id)
            .ok_or_else(|| PixelHubError::api(404, "Image not found"))?;
        match update.mode {
            TagMode::Set => image.tags = update.tags.clone(),
            TagMode::Append => image.tags.extend(update.tags.iter().cloned()),
        }
        Ok(())
    }

    async fn batch_delete(&self, item_ids: &[String]) -> Result<BatchDeleteResponse> {
        self.record("batch_delete");
        self.round_trip("").await;
        if let Some(error) = self.scripted_failure("batch_delete", "") {
            return Err(error);
        }

        let mut images = self.images.lock().unwrap();
        let results: Vec<DeleteResult> = item_ids
            .iter()
            .map(|id| {
                let position = images.iter().position(|image| &image.id == id);
                match position {
                    Some(position) if self.scripted_failure("batch_delete", id).is_none() => {
                        images.remove(position);
                        DeleteResult {
                            image_id: id.clone(),
                            status: DeleteStatus::Success,
                            error: None,
                        }
                    }
                    Some(_) => DeleteResult {
                        image_id: id.clone(),
                        status: DeleteStatus::Failed,
                        error: Some("Failed to delete image".to_string()),
                    },
                    None => DeleteResult {
                        image_id: id.clone(),
                        status: DeleteStatus::Failed,
                        error: Some("Image not found".to_string()),
                    },
                }
            })
            .collect();

        let success = results
            .iter()
            .filter(|result| result.status == DeleteStatus::Success)
            .count();
        Ok(BatchDeleteResponse {
            total: results.len(),
            success,
            failed: results.len() - success,
            results,
        })
    }
}
