//! Mutation recording.
//!
//! Writers describe what changed with a [`Mutation`]; the registry turns it
//! into tags and hands each tag to every registered [`CacheInvalidator`].

use std::sync::Arc;

use tracing::info;

use crate::domain::cache_tag::{CacheTag, Mutation};
use crate::port::outbound::cache::CacheInvalidator;
use crate::port::outbound::event::EventStore;

#[derive(Default)]
pub struct InvalidationRegistry {
    invalidators: Vec<Arc<dyn CacheInvalidator>>,
}

impl InvalidationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, invalidator: Arc<dyn CacheInvalidator>) -> Self {
        self.invalidators.push(invalidator);
        self
    }

    pub fn register(&mut self, invalidator: Arc<dyn CacheInvalidator>) {
        self.invalidators.push(invalidator);
    }

    /// Invalidate every tag `mutation` maps to. Returns the tags.
    pub fn record(&self, mutation: &Mutation) -> Vec<CacheTag> {
        let tags = mutation.invalidates();
        let dropped: usize = tags
            .iter()
            .flat_map(|tag| self.invalidators.iter().map(move |inv| inv.invalidate(tag)))
            .sum();

        info!(
            mutation = ?mutation,
            tags = %join_tags(&tags),
            dropped,
            "Recorded mutation"
        );
        tags
    }
}

fn join_tags(tags: &[CacheTag]) -> String {
    tags.iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Clears the repository tag cache when categories change.
pub struct TagCacheInvalidator {
    store: Arc<dyn EventStore>,
}

impl TagCacheInvalidator {
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self { store }
    }
}

impl CacheInvalidator for TagCacheInvalidator {
    fn invalidate(&self, tag: &CacheTag) -> usize {
        match tag {
            CacheTag::AdminCategories => {
                self.store.reset_tag_cache();
                1
            }
            _ => 0,
        }
    }
}
