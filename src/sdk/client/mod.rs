//! PixelHub client module
//!
//! This module provides the reqwest-backed implementation of
//! [`ImageService`](crate::core::ImageService) for the PixelHub REST API.

mod client;
mod images;
mod types;


// Re-export the main client
pub use client::PixelHubClient;
