//! Batch execution primitives
//!
//! This module provides the task/outcome model and the bounded-concurrency
//! executor used by every batch workflow.

mod async_batch;
mod types;


// Re-export all public types
pub use async_batch::{BoundedExecutor, run_bounded};
pub use types::{BatchProgress, BatchReport, Task, TaskError, TaskOutcome};
