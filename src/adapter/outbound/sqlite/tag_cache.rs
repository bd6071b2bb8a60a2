//! Repository-owned cache of the tag table.
//!
//! Populated on first use by whichever query needs a slug lookup. Cleared
//! by [`TagCache::reset`] when a category mutation is recorded; nothing
//! else writes the tag table at runtime. A load that overlaps a reset is
//! used by its query but not kept.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use diesel::prelude::*;
use diesel::SqliteConnection;
use parking_lot::RwLock;

use super::database::connection::db_err;
use super::database::model::TagRow;
use super::database::schema::tags;
use crate::domain::tag::Tag;
use crate::error::Result;

/// Slug-indexed snapshot of every tag row.
pub type TagIndex = Arc<HashMap<String, Tag>>;

#[derive(Debug, Default)]
pub struct TagCache {
    entries: RwLock<Option<TagIndex>>,
    generation: AtomicU64,
}

impl TagCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached index, loading it with `conn` on a miss.
    ///
    /// # Errors
    /// Returns an error if the tag table cannot be read.
    pub fn get_or_load(&self, conn: &mut SqliteConnection) -> Result<TagIndex> {
        if let Some(index) = self.entries.read().as_ref() {
            return Ok(Arc::clone(index));
        }

        let generation = self.generation.load(Ordering::Acquire);
        let rows: Vec<TagRow> = tags::table
            .select(TagRow::as_select())
            .load(conn)
            .map_err(db_err)?;
        let index: TagIndex = Arc::new(
            rows.into_iter()
                .map(|row| (row.slug.clone(), tag_from_row(row)))
                .collect(),
        );

        self.store_if_current(generation, &index);
        Ok(index)
    }

    fn store_if_current(&self, generation: u64, index: &TagIndex) {
        let mut entries = self.entries.write();
        if self.generation.load(Ordering::Acquire) == generation {
            *entries = Some(Arc::clone(index));
        }
    }

    pub fn reset(&self) {
        let mut entries = self.entries.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        *entries = None;
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.entries.read().is_some()
    }
}

pub(crate) fn tag_from_row(row: TagRow) -> Tag {
    Tag {
        id: row.id,
        slug: row.slug,
        name: row.name,
        is_main_category: row.is_main_category,
        is_hidden: row.is_hidden,
        display_order: row.display_order,
    }
}
