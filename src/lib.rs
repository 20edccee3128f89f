//! # pixelhub-batch
//!
//! Batch operations against a PixelHub image server.
//!
//! ## Features
//!
//! - **Bounded concurrency**: run many per-image requests with a fixed ceiling
//!   on how many are in flight, with results reported in submission order
//! - **Partial failure**: every item gets its own outcome; one failure never
//!   aborts the batch
//! - **Cross-page selection**: select images across every page of the listing,
//!   with a lazily fetched "select all"
//! - **Bulk workflows**: AI tag generation, description and tag save, bulk delete
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pixelhub_batch::{BatchCoordinator, Config, GenerateParams, PixelHubClient, UploadedItem};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/pixelhub.yaml").await?;
//!     let client = PixelHubClient::new(config.client.clone())?;
//!     let coordinator = BatchCoordinator::new(client, config.batch.clone());
//!
//!     let mut items = vec![UploadedItem::new("img_1"), UploadedItem::new("img_2")];
//!     let params = GenerateParams::default().with_concurrency(2);
//!     let report = coordinator.run_bulk_generate(&mut items, &params).await?;
//!
//!     println!("{} of {} succeeded", report.succeeded(), report.total());
//!     for failure in report.failures() {
//!         println!("{:?}: {:?}", failure.item_id, failure.error());
//!     }
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Public module exports
pub mod config;
pub mod core;
pub mod sdk;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{PixelHubError, Result};

// Export core functionality
pub use crate::core::batch::{
    BatchProgress, BatchReport, BoundedExecutor, Task, TaskError, TaskOutcome, run_bounded,
};
pub use crate::core::coordinator::BatchCoordinator;
pub use crate::core::selection::SelectionState;
pub use crate::core::traits::ImageService;
pub use crate::core::types::{
    BatchDeleteResponse, DeleteResult, DeleteStatus, GenerateParams, GenerateTagsRequest,
    GeneratedTags, ImagePage, ImageSummary, ItemInput, SaveSteps, SortOrder, TagMode, TagUpdate,
    UploadedItem,
};
pub use sdk::PixelHubClient;

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
