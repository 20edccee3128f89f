//! Batch operation coordinator
//!
//! Drives the three batch workflows against an [`ImageService`]:
//!
//! - bulk tag generation through the bounded executor
//! - bulk description and tag save, one item after another
//! - bulk delete of the current selection in a single remote call
//!
//! It also owns the batch delete mode state. The selection only exists while
//! the mode is active; it is created on entry and discarded on exit.

mod delete;
mod generate;
mod save;


use crate::config::BatchSettings;
use crate::core::batch::BatchProgress;
use crate::core::selection::SelectionState;
use crate::core::traits::ImageService;
use crate::utils::error::{PixelHubError, Result};
use tokio::sync::{Mutex, watch};

/// Coordinates batch workflows for one image service
pub struct BatchCoordinator<S> {
    /// Remote image service
    service: S,
    /// Workflow settings
    settings: BatchSettings,
    /// Selection while batch delete mode is active, `None` otherwise
    delete_mode: Mutex<Option<SelectionState>>,
    /// Progress of the workflow currently running
    progress: watch::Sender<BatchProgress>,
}

impl<S: ImageService> BatchCoordinator<S> {
    /// Create a coordinator with the given settings
    pub fn new(service: S, settings: BatchSettings) -> Self {
        let (progress, _) = watch::channel(BatchProgress::default());
        Self {
            service,
            settings,
            delete_mode: Mutex::new(None),
            progress,
        }
    }

    /// Create a coordinator with default settings
    pub fn with_defaults(service: S) -> Self {
        Self::new(service, BatchSettings::default())
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn settings(&self) -> &BatchSettings {
        &self.settings
    }

    /// Watch the progress of running workflows
    ///
    /// The value is reset at the start of every bulk generate and bulk save.
    pub fn subscribe_progress(&self) -> watch::Receiver<BatchProgress> {
        self.progress.subscribe()
    }

    fn publish_progress(&self, progress: BatchProgress) {
        self.progress.send_replace(progress);
    }

    fn check_concurrency(&self, concurrency: usize) -> Result<()> {
        if self.settings.accepts_concurrency(concurrency) {
            return Ok(());
        }
        Err(PixelHubError::validation(format!(
            "concurrency must be between {} and {}, got {}",
            self.settings.min_concurrency, self.settings.max_concurrency, concurrency
        )))
    }
}

impl<S> std::fmt::Debug for BatchCoordinator<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchCoordinator")
            .field("settings", &self.settings)
            .field("progress", &*self.progress.borrow())
            .finish_non_exhaustive()
    }
}
