//! Core functionality for batch image operations
//!
//! This module contains the batch executor, selection state, the workflow
//! coordinator and the remote service interface they share.

pub mod batch; // Bounded-concurrency executor and batch reports
pub mod coordinator; // Bulk generate / save / delete workflows
pub mod selection; // Cross-page selection for batch delete mode
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use batch::{BatchProgress, BatchReport, BoundedExecutor, Task, TaskError, TaskOutcome};
pub use coordinator::BatchCoordinator;
pub use selection::SelectionState;
pub use traits::ImageService;
