//! Cache invalidation port.

use crate::domain::cache_tag::CacheTag;

/// Drops cached renders by tag.
pub trait CacheInvalidator: Send + Sync {
    /// Invalidate every entry carrying `tag`. Returns the number dropped.
    fn invalidate(&self, tag: &CacheTag) -> usize;
}
