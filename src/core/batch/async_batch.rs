//! Bounded Concurrency Executor - Sliding Window Task Admission
//!
//! Runs a sequence of independent tasks with at most `concurrency` of them
//! unsettled at any instant. Tasks are admitted in submission order; as soon
//! as one settles the next queued task is admitted. Completion order is
//! unconstrained, the returned report is always ordered by submission index.
//!
//! Everything runs on the caller's task: "concurrency" counts outstanding
//! remote calls, not threads.

use super::types::{BatchProgress, BatchReport, Task};
use crate::utils::error::{PixelHubError, Result};
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, warn};

/// Executor with a fixed concurrency ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundedExecutor {
    concurrency: usize,
}

impl BoundedExecutor {
    /// Create an executor; a ceiling of zero is a configuration error
    pub fn new(concurrency: usize) -> Result<Self> {
        if concurrency == 0 {
            return Err(PixelHubError::configuration(
                "concurrency must be at least 1",
            ));
        }
        Ok(Self { concurrency })
    }

    /// Maximum number of unsettled tasks
    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run every task and return one outcome per task, ordered by index
    ///
    /// A failing task never short-circuits the batch.
    pub async fn run<'a, T: 'a>(
        &self,
        tasks: impl IntoIterator<Item = Task<'a, T>>,
    ) -> BatchReport<T> {
        self.run_with_progress(tasks, |_| {}).await
    }

    /// Like [`run`](Self::run), invoking `on_progress` after every settlement
    pub async fn run_with_progress<'a, T, P>(
        &self,
        tasks: impl IntoIterator<Item = Task<'a, T>>,
        mut on_progress: P,
    ) -> BatchReport<T>
    where
        T: 'a,
        P: FnMut(BatchProgress),
    {
        let tasks: Vec<Task<'a, T>> = tasks.into_iter().collect();
        let total = tasks.len();
        if total == 0 {
            debug!("Empty batch, nothing to schedule");
            return BatchReport::empty();
        }

        debug!(
            "Running batch of {} tasks with concurrency {}",
            total, self.concurrency
        );

        let mut queue = tasks.into_iter().enumerate();
        let mut in_flight = FuturesUnordered::new();
        let mut outcomes = Vec::with_capacity(total);
        let mut progress = BatchProgress::new(total);

        for (index, task) in queue.by_ref().take(self.concurrency) {
            debug!(index, "Admitting task");
            in_flight.push(task.launch(index));
        }

        while let Some(outcome) = in_flight.next().await {
            progress.record(outcome.is_success());
            match outcome.error() {
                Some(error) => warn!(
                    index = outcome.index,
                    item_id = outcome.item_id.as_deref().unwrap_or("-"),
                    "Task failed: {}",
                    error
                ),
                None => debug!(index = outcome.index, "Task succeeded"),
            }
            outcomes.push(outcome);
            on_progress(progress);

            if let Some((index, task)) = queue.next() {
                debug!(index, "Admitting task");
                in_flight.push(task.launch(index));
            }
        }

        BatchReport::from_outcomes(outcomes)
    }
}

/// Convenience function for a one-off bounded run without keeping an executor
pub async fn run_bounded<'a, T: 'a>(
    tasks: impl IntoIterator<Item = Task<'a, T>>,
    concurrency: usize,
) -> Result<BatchReport<T>> {
    let executor = BoundedExecutor::new(concurrency)?;
    Ok(executor.run(tasks).await)
}
