//! Core traits module
//!
//! Contains the abstract interface to the remote image service

pub mod image_service;

pub use image_service::*;
