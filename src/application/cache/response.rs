//! Tagged response cache.

use std::sync::Arc;
use std::time::{Duration, Instant};

use dashmap::DashMap;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::cache_tag::CacheTag;
use crate::port::outbound::cache::CacheInvalidator;

struct CachedResponse {
    body: Arc<str>,
    tags: Vec<CacheTag>,
    inserted: Instant,
}

/// Serialized responses keyed by a request key and tagged with the
/// entities they were rendered from.
///
/// Every invalidation advances a generation counter. A response rendered
/// from reads that started before an invalidation is refused by
/// [`ResponseCache::insert_at`], so it cannot repopulate the cache.
pub struct ResponseCache {
    entries: DashMap<String, CachedResponse>,
    // Held shared by inserts and exclusively by invalidations.
    generation: RwLock<u64>,
    ttl: Duration,
    max_entries: usize,
}

impl ResponseCache {
    #[must_use]
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            entries: DashMap::new(),
            generation: RwLock::new(0),
            ttl,
            max_entries,
        }
    }

    /// Cached body for `key`, unless expired.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<str>> {
        let entry = self.entries.get(key)?;
        if entry.inserted.elapsed() < self.ttl {
            return Some(Arc::clone(&entry.body));
        }
        drop(entry);
        self.entries.remove(key);
        None
    }

    /// Current generation. Capture it before reading the data a response
    /// is rendered from.
    #[must_use]
    pub fn generation(&self) -> u64 {
        *self.generation.read()
    }

    pub fn insert(&self, key: impl Into<String>, body: impl Into<Arc<str>>, tags: Vec<CacheTag>) {
        let _guard = self.generation.read();
        self.store(key.into(), body.into(), tags);
    }

    /// Insert only if no invalidation happened since `generation` was
    /// captured. Returns whether the entry was stored.
    pub fn insert_at(
        &self,
        generation: u64,
        key: impl Into<String>,
        body: impl Into<Arc<str>>,
        tags: Vec<CacheTag>,
    ) -> bool {
        let current = self.generation.read();
        if *current != generation {
            debug!(generation, current = *current, "Skipping stale response");
            return false;
        }
        self.store(key.into(), body.into(), tags);
        true
    }

    fn store(&self, key: String, body: Arc<str>, tags: Vec<CacheTag>) {
        if self.max_entries == 0 {
            return;
        }
        self.entries.insert(
            key,
            CachedResponse {
                body,
                tags,
                inserted: Instant::now(),
            },
        );

        if self.entries.len() > self.max_entries {
            self.gc();
        }
    }

    /// Drop expired entries, then the oldest ones until under the limit.
    pub fn gc(&self) {
        let ttl = self.ttl;
        self.entries.retain(|_, entry| entry.inserted.elapsed() < ttl);

        if self.entries.len() > self.max_entries {
            let mut by_age: Vec<(String, Instant)> = self
                .entries
                .iter()
                .map(|entry| (entry.key().clone(), entry.value().inserted))
                .collect();
            by_age.sort_by(|a, b| a.1.cmp(&b.1));

            let to_remove = by_age.len().saturating_sub(self.max_entries);
            for (key, _) in by_age.into_iter().take(to_remove) {
                self.entries.remove(&key);
            }
        }
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

impl CacheInvalidator for ResponseCache {
    fn invalidate(&self, tag: &CacheTag) -> usize {
        let mut generation = self.generation.write();
        *generation += 1;
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.tags.contains(tag));
        let dropped = before.saturating_sub(self.entries.len());
        if dropped > 0 {
            debug!(tag = %tag, dropped, "Invalidated cached responses");
        }
        drop(generation);
        dropped
    }
}
