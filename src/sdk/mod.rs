//! PixelHub SDK
//!
//! This module provides the HTTP client the batch workflows use to talk to a
//! PixelHub server.

pub mod client;

// Re-exports for convenience
pub use client::PixelHubClient;

/// SDK version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
