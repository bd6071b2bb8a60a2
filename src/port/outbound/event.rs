//! Event repository port.
//!
//! Filtering happens in storage; ranking and pagination happen in the
//! application layer so the ranking policy stays pluggable.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::domain::criteria::ListCriteria;
use crate::domain::event::Event;
use crate::domain::id::{EventId, UserId};
use crate::domain::locale::Locale;
use crate::domain::market::Market;
use crate::domain::tag::Tag;
use crate::error::Result;

/// Storage operations behind event listings.
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Events matching every filter dimension of `criteria`.
    ///
    /// Titles are localized to `criteria.locale`. Markets, tags and
    /// bookmark flags are left empty; see the `load_*` methods.
    async fn find_candidates(&self, criteria: &ListCriteria) -> Result<Vec<Event>>;

    /// Markets of the given events, ordered by creation then condition id.
    async fn load_markets(&self, event_ids: &[EventId]) -> Result<Vec<Market>>;

    /// `(event id, tag slug)` pairs for the given events.
    async fn load_event_tags(&self, event_ids: &[EventId]) -> Result<Vec<(EventId, String)>>;

    /// Subset of `event_ids` the user has bookmarked.
    async fn load_bookmarks(
        &self,
        user_id: &UserId,
        event_ids: &[EventId],
    ) -> Result<HashSet<EventId>>;

    /// Look up one event by slug, hidden or not.
    async fn find_by_slug(&self, slug: &str, locale: Locale) -> Result<Option<Event>>;

    /// Active, visible events carrying any of `tag_slugs`, except `exclude`.
    async fn find_sharing_tags(
        &self,
        exclude: &EventId,
        tag_slugs: &[String],
        locale: Locale,
    ) -> Result<Vec<Event>>;

    /// Visible main-category tags in display order, names localized.
    async fn main_tags(&self, locale: Locale) -> Result<Vec<Tag>>;

    /// Set the hidden flag. Returns the event slug, or `None` if unknown.
    async fn set_hidden(&self, event_id: &EventId, hidden: bool) -> Result<Option<String>>;

    /// Update a category's flags. Returns false if the slug is unknown.
    async fn update_category(
        &self,
        slug: &str,
        is_main_category: bool,
        is_hidden: bool,
    ) -> Result<bool>;

    /// Drop cached tag lookups so the next query reloads them.
    fn reset_tag_cache(&self);
}
