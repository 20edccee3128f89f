//! Error handling for PixelHub batch operations
//!
//! This module defines the crate-wide error type and its conversions.

mod conversions;
mod helpers;
mod types;

pub use types::{PixelHubError, Result};
