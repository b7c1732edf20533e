//! Session cache of episode lists, keyed by show.
//!
//! Entries are created lazily on the first successful fetch and never expire.

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::ShowId;
use crate::models::Episode;

#[derive(Debug, Default, Clone)]
pub struct EpisodeCache {
    entries: HashMap<ShowId, Arc<[Episode]>>,
}

impl EpisodeCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, show_id: ShowId) -> Option<Arc<[Episode]>> {
        self.entries.get(&show_id).cloned()
    }

    /// Stores `episodes`, replacing whatever was cached for the show.
    pub fn put(&mut self, show_id: ShowId, episodes: impl Into<Arc<[Episode]>>) -> Arc<[Episode]> {
        let episodes = episodes.into();
        self.entries.insert(show_id, Arc::clone(&episodes));
        episodes
    }

    #[must_use]
    pub fn contains(&self, show_id: ShowId) -> bool {
        self.entries.contains_key(&show_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
