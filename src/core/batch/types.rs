//! Batch task, outcome and report types

use crate::utils::error::{PixelHubError, Result};
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::future::Future;

/// Why a single task failed
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TaskError {
    /// Human-readable error message
    pub message: String,
    /// Status code reported by the remote service (if available)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl TaskError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }
}

impl std::fmt::Display for TaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TaskError {}

impl From<PixelHubError> for TaskError {
    fn from(err: PixelHubError) -> Self {
        Self {
            code: err.status_code().map(|status| status.to_string()),
            message: err.to_string(),
        }
    }
}

/// Settled result of one task, tagged with its submission index
#[derive(Debug, Clone, PartialEq)]
pub struct TaskOutcome<T> {
    /// Position of the task in the submitted sequence
    pub index: usize,
    /// External identifier of the item the task worked on
    pub item_id: Option<String>,
    /// Value on success, error on failure
    pub result: std::result::Result<T, TaskError>,
}

impl<T> TaskOutcome<T> {
    pub fn success(index: usize, item_id: Option<String>, value: T) -> Self {
        Self {
            index,
            item_id,
            result: Ok(value),
        }
    }

    pub fn failure(index: usize, item_id: Option<String>, error: TaskError) -> Self {
        Self {
            index,
            item_id,
            result: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }

    pub fn error(&self) -> Option<&TaskError> {
        self.result.as_ref().err()
    }
}

impl<T: Serialize> Serialize for TaskOutcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("TaskOutcome", 4)?;
        state.serialize_field("index", &self.index)?;
        state.serialize_field("item_id", &self.item_id)?;
        state.serialize_field("success", &self.is_success())?;
        match &self.result {
            Ok(value) => state.serialize_field("value", value)?,
            Err(error) => state.serialize_field("error", error)?,
        }
        state.end()
    }
}

/// Aggregate of every outcome of one batch workflow, ordered by index
///
/// Always `total == succeeded + failed == outcomes.len()`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct BatchReport<T> {
    total: usize,
    succeeded: usize,
    failed: usize,
    outcomes: Vec<TaskOutcome<T>>,
}

impl<T> BatchReport<T> {
    /// Build a report from outcomes settled in any order
    pub fn from_outcomes(mut outcomes: Vec<TaskOutcome<T>>) -> Self {
        outcomes.sort_by_key(|outcome| outcome.index);
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        Self {
            total: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
            outcomes,
        }
    }

    /// A report for a batch with no tasks
    pub fn empty() -> Self {
        Self::from_outcomes(Vec::new())
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn succeeded(&self) -> usize {
        self.succeeded
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn outcomes(&self) -> &[TaskOutcome<T>] {
        &self.outcomes
    }

    pub fn into_outcomes(self) -> Vec<TaskOutcome<T>> {
        self.outcomes
    }

    /// Outcomes that did not succeed, in index order
    pub fn failures(&self) -> impl Iterator<Item = &TaskOutcome<T>> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    /// Whether every task succeeded (vacuously true for an empty batch)
    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }

    /// Replace every value while keeping indices, ids and errors
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> BatchReport<U> {
        BatchReport {
            total: self.total,
            succeeded: self.succeeded,
            failed: self.failed,
            outcomes: self
                .outcomes
                .into_iter()
                .map(|o| TaskOutcome {
                    index: o.index,
                    item_id: o.item_id,
                    result: o.result.map(&mut f),
                })
                .collect(),
        }
    }
}

/// Running counters published while a batch executes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct BatchProgress {
    pub settled: usize,
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchProgress {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Default::default()
        }
    }

    pub fn record(&mut self, success: bool) {
        self.settled += 1;
        if success {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    pub fn is_finished(&self) -> bool {
        self.settled == self.total
    }
}

/// A zero-argument asynchronous unit of work bound to one item
///
/// The closure runs at most once, when the executor admits the task.
pub struct Task<'a, T> {
    item_id: Option<String>,
    start: Box<dyn FnOnce() -> BoxFuture<'a, Result<T>> + Send + 'a>,
}

impl<'a, T: 'a> Task<'a, T> {
    pub fn new<F, Fut>(start: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T>> + Send + 'a,
    {
        Self {
            item_id: None,
            start: Box::new(move || start().boxed()),
        }
    }

    /// Create a task tagged with an external item identifier
    pub fn for_item<F, Fut>(item_id: impl Into<String>, start: F) -> Self
    where
        F: FnOnce() -> Fut + Send + 'a,
        Fut: Future<Output = Result<T>> + Send + 'a,
    {
        Self::new(start).with_item_id(item_id)
    }

    pub fn with_item_id(mut self, item_id: impl Into<String>) -> Self {
        self.item_id = Some(item_id.into());
        self
    }

    pub fn item_id(&self) -> Option<&str> {
        self.item_id.as_deref()
    }

    /// Invoke the task and capture its settlement as an outcome
    pub(crate) fn launch(self, index: usize) -> impl Future<Output = TaskOutcome<T>> + 'a {
        let Task { item_id, start } = self;
        let running = start();
        async move {
            TaskOutcome {
                index,
                item_id,
                result: running.await.map_err(TaskError::from),
            }
        }
    }
}

impl<T> std::fmt::Debug for Task<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("item_id", &self.item_id)
            .finish_non_exhaustive()
    }
}
