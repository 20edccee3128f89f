//! Test fixtures and data factories
//!
//! Provides factory methods for creating test data with sensible defaults.

use pixelhub_batch::{ItemInput, TagMode, UploadedItem};

/// Factory for in-memory uploaded items
pub struct ItemFactory;

impl ItemFactory {
    /// One item per id, with no local description or tags
    pub fn uploaded(ids: &[String]) -> Vec<UploadedItem> {
        ids.iter().cloned().map(UploadedItem::new).collect()
    }

    /// Item that already carries `tags` locally
    pub fn tagged(id: &str, tags: &[&str]) -> UploadedItem {
        UploadedItem::new(id).with_tags(tags.iter().copied())
    }

    /// Ids `img_000` to `img_{n-1}`, matching [`FakeImageService::with_images`]
    ///
    /// [`FakeImageService::with_images`]: super::FakeImageService::with_images
    pub fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("img_{:03}", i)).collect()
    }
}

/// Factory for bulk save inputs
pub struct SaveInputFactory;

impl SaveInputFactory {
    /// Description and tags, tags replacing the image's
    pub fn full(description: &str, tags: &[&str]) -> ItemInput {
        ItemInput::new(description, tags.iter().map(|t| t.to_string()).collect())
    }

    /// Tags only, appended to the image's
    pub fn append_tags(tags: &[&str]) -> ItemInput {
        ItemInput {
            description: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            tag_mode: TagMode::Append,
        }
    }

    /// Nothing to save
    pub fn empty() -> ItemInput {
        ItemInput::default()
    }
}
