//! Cross-page selection with a lazily fetched full-identifier cache

use crate::utils::error::{PixelHubError, Result};
use std::collections::{HashMap, HashSet};
use std::future::Future;
use tracing::{debug, info, warn};

/// Selected image identifiers spanning every page of the listing
///
/// Before "select all" is first used the selection may hold any identifier
/// toggled from a visible page. Once the full-identifier cache is populated
/// the selection is kept a subset of it.
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    /// Selected id -> toggle sequence number
    selected: HashMap<String, u64>,
    next_seq: u64,
    /// Every id of the collection in listing order
    cache: Vec<String>,
    cache_index: HashSet<String>,
    /// Set once a listing has been fetched, even an empty one
    cache_populated: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `item_id` if absent, remove it if present
    ///
    /// Returns whether the id is selected after the call. With a populated
    /// cache, ids outside the cache are ignored.
    pub fn toggle(&mut self, item_id: &str) -> bool {
        if self.selected.remove(item_id).is_some() {
            debug!(item_id, "Deselected");
            return false;
        }

        if self.is_cache_populated() && !self.cache_index.contains(item_id) {
            warn!(item_id, "Ignoring selection of an id outside the full listing");
            return false;
        }

        self.insert(item_id.to_string());
        debug!(item_id, "Selected");
        true
    }

    /// Add `item_id` if absent; returns whether it was newly added
    ///
    /// Unlike [`toggle`](Self::toggle), repeating an id never deselects it.
    pub fn select(&mut self, item_id: &str) -> bool {
        if self.selected.contains_key(item_id) {
            return false;
        }
        if self.is_cache_populated() && !self.cache_index.contains(item_id) {
            warn!(item_id, "Ignoring selection of an id outside the full listing");
            return false;
        }

        self.insert(item_id.to_string());
        debug!(item_id, "Selected");
        true
    }

    /// Empty the selection, keeping the cache
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Number of selected ids
    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, item_id: &str) -> bool {
        self.selected.contains_key(item_id)
    }

    /// Selected ids in listing order when the cache is populated, toggle order otherwise
    pub fn selected_ids(&self) -> Vec<String> {
        if self.is_cache_populated() {
            return self
                .cache
                .iter()
                .filter(|id| self.selected.contains_key(*id))
                .cloned()
                .collect();
        }

        let mut ordered: Vec<(&String, &u64)> = self.selected.iter().collect();
        ordered.sort_by_key(|(_, seq)| **seq);
        ordered.into_iter().map(|(id, _)| id.clone()).collect()
    }

    /// Select every id in the collection, or deselect everything if all are already selected
    ///
    /// `fetch_all_ids` is invoked only until a listing has been cached, so an
    /// empty collection is not refetched either. If it fails the cache stays
    /// unpopulated, the selection is untouched and a
    /// [`PixelHubError::RemoteFetch`] is returned.
    pub async fn select_all<F, Fut>(&mut self, fetch_all_ids: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Vec<String>>>,
    {
        if !self.is_cache_populated() {
            let ids = fetch_all_ids()
                .await
                .map_err(|e| PixelHubError::remote_fetch(e.to_string()))?;
            info!("Fetched {} ids for select all", ids.len());
            self.populate_cache(ids);
        }

        if self.cache.is_empty() || self.is_all_selected() {
            debug!("Deselecting all");
            self.clear();
            return Ok(());
        }

        let missing: Vec<String> = self
            .cache
            .iter()
            .filter(|id| !self.selected.contains_key(*id))
            .cloned()
            .collect();
        for id in missing {
            self.insert(id);
        }
        debug!("Selected all {} ids", self.selected.len());
        Ok(())
    }

    /// True iff the cached listing is non-empty and every cached id is selected
    pub fn is_all_selected(&self) -> bool {
        !self.cache.is_empty()
            && self
                .cache
                .iter()
                .all(|id| self.selected.contains_key(id))
    }

    pub fn is_cache_populated(&self) -> bool {
        self.cache_populated
    }

    pub fn cache_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop the cached listing so the next select all refetches it
    pub fn invalidate_cache(&mut self) {
        self.cache.clear();
        self.cache_index.clear();
        self.cache_populated = false;
    }

    /// Forget both the selection and the cache
    pub fn reset(&mut self) {
        self.clear();
        self.invalidate_cache();
        self.next_seq = 0;
    }

    fn insert(&mut self, item_id: String) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.selected.entry(item_id).or_insert(seq);
    }

    fn populate_cache(&mut self, ids: Vec<String>) {
        self.cache.clear();
        self.cache_index.clear();
        for id in ids {
            if self.cache_index.insert(id.clone()) {
                self.cache.push(id);
            }
        }
        self.cache_populated = true;

        let before = self.selected.len();
        let cache_index = &self.cache_index;
        self.selected.retain(|id, _| cache_index.contains(id));
        let dropped = before - self.selected.len();
        if dropped > 0 {
            warn!("Dropped {} selected ids missing from the full listing", dropped);
        }
    }
}
