//! Bulk AI tag generation

use super::BatchCoordinator;
use crate::core::batch::{BatchProgress, BatchReport, BoundedExecutor, Task};
use crate::core::traits::ImageService;
use crate::core::types::{GenerateParams, GenerateTagsRequest, UploadedItem};
use crate::utils::error::Result;
use crate::utils::generate_batch_id;
use crate::utils::tags::{clean_tags, merge_tags};
use tracing::{debug, info, instrument};

impl<S: ImageService> BatchCoordinator<S> {
    /// Generate tags for every item with at most `params.concurrency` requests in flight
    ///
    /// Tags returned for an item are merged into `items[i].tags`; failed items
    /// keep their tags. An out-of-range concurrency is rejected before any
    /// request is made.
    #[instrument(skip_all, fields(batch_id = %generate_batch_id(), items = items.len()))]
    pub async fn run_bulk_generate(
        &self,
        items: &mut [UploadedItem],
        params: &GenerateParams,
    ) -> Result<BatchReport<Vec<String>>> {
        self.check_concurrency(params.concurrency)?;
        let executor = BoundedExecutor::new(params.concurrency)?;
        let request = self.generation_request(params);

        info!(
            "Generating tags for {} images with concurrency {}",
            items.len(),
            params.concurrency
        );

        let service = &self.service;
        let request = &request;
        let tasks: Vec<Task<'_, Vec<String>>> = items
            .iter()
            .map(|item| {
                let item_id = item.image_id.clone();
                Task::for_item(item_id.clone(), move || async move {
                    let generated = service.generate_tags(&item_id, request).await?;
                    Ok(clean_tags(generated.generated_tags))
                })
            })
            .collect();

        self.publish_progress(BatchProgress::new(tasks.len()));
        let report = executor
            .run_with_progress(tasks, |progress| self.publish_progress(progress))
            .await;

        for outcome in report.outcomes() {
            if let Some(tags) = outcome.value() {
                let item = &mut items[outcome.index];
                let added = merge_tags(&mut item.tags, tags);
                debug!(item_id = %item.image_id, added, "Merged generated tags");
            }
        }

        info!(
            "Tag generation finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    /// Build the request body, filling in configured defaults
    pub(crate) fn generation_request(&self, params: &GenerateParams) -> GenerateTagsRequest {
        let delimiter = if params.delimiter.is_empty() {
            self.settings.default_delimiter.clone()
        } else {
            params.delimiter.clone()
        };
        let prompt = params
            .prompt
            .clone()
            .filter(|prompt| !prompt.trim().is_empty())
            .or_else(|| self.settings.default_prompt.clone());

        GenerateTagsRequest {
            prompt,
            delimiter,
            mode: params.mode,
        }
    }
}
