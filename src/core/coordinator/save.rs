//! Bulk description and tag save

use super::BatchCoordinator;
use crate::core::batch::{BatchProgress, BatchReport, TaskError, TaskOutcome};
use crate::core::traits::ImageService;
use crate::core::types::{ItemInput, SaveSteps, TagMode, TagUpdate, UploadedItem};
use crate::utils::error::{PixelHubError, Result};
use crate::utils::generate_batch_id;
use crate::utils::tags::{clean_tags, merge_tags};
use tracing::{debug, info, instrument, warn};

impl<S: ImageService> BatchCoordinator<S> {
    /// Save each item's description and tags, one item at a time
    ///
    /// `inputs[i]` belongs to `items[i]`. Within an item the description is
    /// written before the tags; the first failing step fails the item and the
    /// next item is processed regardless. Successful writes are mirrored into
    /// the in-memory item.
    #[instrument(skip_all, fields(batch_id = %generate_batch_id(), items = items.len()))]
    pub async fn run_bulk_save(
        &self,
        items: &mut [UploadedItem],
        inputs: &[ItemInput],
    ) -> Result<BatchReport<SaveSteps>> {
        if items.len() != inputs.len() {
            return Err(PixelHubError::validation(format!(
                "{} items but {} inputs",
                items.len(),
                inputs.len()
            )));
        }

        info!("Saving {} images", items.len());

        let mut progress = BatchProgress::new(items.len());
        self.publish_progress(progress);
        let mut outcomes = Vec::with_capacity(items.len());

        for (index, (item, input)) in items.iter_mut().zip(inputs).enumerate() {
            let outcome = match self.save_item(&item.image_id, input).await {
                Ok(steps) => {
                    apply_locally(item, input, steps);
                    debug!(item_id = %item.image_id, ?steps, "Saved");
                    TaskOutcome::success(index, Some(item.image_id.clone()), steps)
                }
                Err(error) => {
                    warn!(item_id = %item.image_id, "Save failed: {}", error);
                    TaskOutcome::failure(index, Some(item.image_id.clone()), error)
                }
            };

            progress.record(outcome.is_success());
            self.publish_progress(progress);
            outcomes.push(outcome);
        }

        let report = BatchReport::from_outcomes(outcomes);
        info!(
            "Save finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }

    async fn save_item(
        &self,
        item_id: &str,
        input: &ItemInput,
    ) -> std::result::Result<SaveSteps, TaskError> {
        let mut steps = SaveSteps::default();

        let description = input.description.trim();
        if !description.is_empty() {
            self.service
                .update_description(item_id, description)
                .await
                .map_err(|e| step_error("Failed to update description", e))?;
            steps.description_updated = true;
        }

        let tags = clean_tags(&input.tags);
        if !tags.is_empty() {
            let update = TagUpdate {
                tags,
                mode: input.tag_mode,
            };
            self.service
                .update_tags(item_id, &update)
                .await
                .map_err(|e| step_error("Failed to update tags", e))?;
            steps.tags_updated = true;
        }

        Ok(steps)
    }
}

fn step_error(step: &str, err: PixelHubError) -> TaskError {
    let mut error = TaskError::from(err);
    error.message = format!("{}: {}", step, error.message);
    error
}

fn apply_locally(item: &mut UploadedItem, input: &ItemInput, steps: SaveSteps) {
    if steps.description_updated {
        item.description = input.description.trim().to_string();
    }
    if steps.tags_updated {
        match input.tag_mode {
            TagMode::Set => item.tags = clean_tags(&input.tags),
            TagMode::Append => {
                merge_tags(&mut item.tags, &input.tags);
            }
        }
    }
}
