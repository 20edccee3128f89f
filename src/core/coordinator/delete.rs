//! Batch delete mode and bulk delete

use super::BatchCoordinator;
use crate::core::batch::{BatchReport, TaskError, TaskOutcome};
use crate::core::selection::SelectionState;
use crate::core::traits::ImageService;
use crate::core::types::{BatchDeleteResponse, DeleteStatus};
use crate::utils::error::{PixelHubError, Result};
use crate::utils::generate_batch_id;
use tracing::{error, info, instrument, warn};

fn inactive() -> PixelHubError {
    PixelHubError::validation("batch delete mode is not active")
}

impl<S: ImageService> BatchCoordinator<S> {
    /// Enter batch delete mode with an empty selection and no cached listing
    pub async fn enter_delete_mode(&self) {
        let mut mode = self.delete_mode.lock().await;
        if mode.is_some() {
            info!("Re-entering batch delete mode, selection reset");
        } else {
            info!("Entered batch delete mode");
        }
        *mode = Some(SelectionState::new());
    }

    /// Leave batch delete mode, discarding the selection
    pub async fn cancel_delete_mode(&self) {
        if self.delete_mode.lock().await.take().is_some() {
            info!("Left batch delete mode");
        }
    }

    pub async fn is_delete_mode_active(&self) -> bool {
        self.delete_mode.lock().await.is_some()
    }

    /// Toggle one id; returns whether it is selected afterwards
    pub async fn toggle_selection(&self, item_id: &str) -> Result<bool> {
        let mut mode = self.delete_mode.lock().await;
        let selection = mode.as_mut().ok_or_else(inactive)?;
        Ok(selection.toggle(item_id))
    }

    pub async fn clear_selection(&self) -> Result<()> {
        let mut mode = self.delete_mode.lock().await;
        mode.as_mut().ok_or_else(inactive)?.clear();
        Ok(())
    }

    /// Select every image in the collection, or deselect all if everything is selected
    ///
    /// The full listing is fetched once per mode session.
    pub async fn select_all(&self) -> Result<()> {
        let mut mode = self.delete_mode.lock().await;
        let selection = mode.as_mut().ok_or_else(inactive)?;
        selection
            .select_all(|| self.service.list_all_item_ids())
            .await
    }

    pub async fn is_all_selected(&self) -> bool {
        self.delete_mode
            .lock()
            .await
            .as_ref()
            .is_some_and(SelectionState::is_all_selected)
    }

    pub async fn selection_count(&self) -> usize {
        self.delete_mode
            .lock()
            .await
            .as_ref()
            .map_or(0, SelectionState::count)
    }

    pub async fn selected_ids(&self) -> Vec<String> {
        self.delete_mode
            .lock()
            .await
            .as_ref()
            .map(SelectionState::selected_ids)
            .unwrap_or_default()
    }

    /// Select each of `item_ids`, leaving already selected ids selected
    ///
    /// Returns how many ids were newly added.
    pub async fn select_ids(&self, item_ids: &[String]) -> Result<usize> {
        let mut mode = self.delete_mode.lock().await;
        let selection = mode.as_mut().ok_or_else(inactive)?;
        Ok(item_ids
            .iter()
            .filter(|item_id| selection.select(item_id.as_str()))
            .count())
    }

    /// Delete the current selection and leave batch delete mode
    ///
    /// An empty selection is rejected and the mode stays active. Once a
    /// report is produced the mode ends, however many deletions failed.
    pub async fn delete_selected(&self) -> Result<BatchReport<()>> {
        let mut mode = self.delete_mode.lock().await;
        let selection = mode.as_ref().ok_or_else(inactive)?;
        let item_ids = selection.selected_ids();

        let report = self.delete_items(&item_ids).await?;
        *mode = None;
        info!("Left batch delete mode after deletion");
        Ok(report)
    }

    /// Delete `item_ids` with one remote call and report each item's result
    ///
    /// The per-item breakdown of the remote response is passed through as is.
    /// If the call itself fails every item is reported failed with that error.
    /// An active batch delete mode ends once the report is produced, taking
    /// its selection and cached listing with it.
    pub async fn run_bulk_delete(&self, item_ids: &[String]) -> Result<BatchReport<()>> {
        let mut mode = self.delete_mode.lock().await;
        let report = self.delete_items(item_ids).await?;
        if mode.take().is_some() {
            info!("Left batch delete mode after deletion");
        }
        Ok(report)
    }

    #[instrument(skip_all, fields(batch_id = %generate_batch_id(), items = item_ids.len()))]
    async fn delete_items(&self, item_ids: &[String]) -> Result<BatchReport<()>> {
        if item_ids.is_empty() {
            error!("Bulk delete requested with nothing selected");
            return Err(PixelHubError::validation("no images selected for deletion"));
        }

        info!("Deleting {} images", item_ids.len());

        let report = match self.service.batch_delete(item_ids).await {
            Ok(response) => report_from_response(response),
            Err(err) => {
                warn!("Batch delete call failed: {}", err);
                let error = TaskError::from(err);
                let outcomes = item_ids
                    .iter()
                    .enumerate()
                    .map(|(index, id)| TaskOutcome::failure(index, Some(id.clone()), error.clone()))
                    .collect();
                BatchReport::from_outcomes(outcomes)
            }
        };

        info!(
            "Delete finished: {} succeeded, {} failed",
            report.succeeded(),
            report.failed()
        );
        Ok(report)
    }
}

fn report_from_response(response: BatchDeleteResponse) -> BatchReport<()> {
    let (total, success, failed) = (response.total, response.success, response.failed);

    let outcomes = response
        .results
        .into_iter()
        .enumerate()
        .map(|(index, result)| match result.status {
            DeleteStatus::Success => TaskOutcome::success(index, Some(result.image_id), ()),
            DeleteStatus::Failed => {
                let message = result.error.unwrap_or_else(|| "delete failed".to_string());
                TaskOutcome::failure(index, Some(result.image_id), TaskError::new(message))
            }
        })
        .collect();
    let report = BatchReport::from_outcomes(outcomes);

    if report.total() != total || report.succeeded() != success || report.failed() != failed {
        warn!(
            "Delete response counts ({} total, {} success, {} failed) disagree with its results",
            total, success, failed
        );
    }
    report
}
