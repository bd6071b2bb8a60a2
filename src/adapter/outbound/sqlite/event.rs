//! SQLite event store implementation.
//!
//! Translates [`ListCriteria`] into one filtered query over `events`.
//! Category, bookmark, exclusion and translated-title filters are
//! `IN (subselect)` clauses so the candidate set comes back in one
//! round trip.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use super::convert::{contains_pattern, event_from_row, market_from_row};
use super::database::connection::{db_err, fold_case, with_connection, DbPool};
use super::database::model::{EventRow, MarketRow, TagRow};
use super::database::schema::{
    bookmarks, event_tags, event_translations, events, markets, tag_translations, tags,
};
use super::tag_cache::{tag_from_row, TagCache};
use crate::domain::criteria::{Frequency, ListCriteria};
use crate::domain::event::{Event, EventStatus};
use crate::domain::id::{EventId, UserId};
use crate::domain::locale::Locale;
use crate::domain::market::Market;
use crate::domain::tag::{ListingTag, Tag, TAG_CRYPTO, TAG_EARNINGS, TAG_SPORTS};
use crate::error::Result;
use crate::port::outbound::event::EventStore;

/// SQLite-backed event store.
pub struct SqliteEventStore {
    pool: DbPool,
    tags: Arc<TagCache>,
}

impl SqliteEventStore {
    /// Create a new store with an empty tag cache.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            tags: Arc::new(TagCache::new()),
        }
    }

    /// The tag cache owned by this store.
    #[must_use]
    pub fn tag_cache(&self) -> &TagCache {
        &self.tags
    }

    fn query_candidates(
        conn: &mut SqliteConnection,
        cache: &TagCache,
        criteria: &ListCriteria,
    ) -> Result<Vec<Event>> {
        let tag_index = cache.get_or_load(conn)?;

        let mut query = events::table
            .filter(events::status.eq(criteria.status.as_str()))
            .into_boxed();

        if !criteria.include_hidden {
            query = query.filter(events::is_hidden.eq(false));
        }

        match &criteria.tag {
            ListingTag::Trending | ListingTag::New => {}
            ListingTag::Sports => {
                query = query.filter(events::sports_sport_slug.is_not_null());
                if let Some(sport) = &criteria.sports_sport_slug {
                    query = query.filter(events::sports_sport_slug.eq(sport.clone()));
                }
                if let Some(section) = criteria.sports_section {
                    query = query.filter(events::sports_section.eq(section.as_str()));
                }
            }
            ListingTag::Category(slug) => {
                let Some(tag) = tag_index.get(slug).filter(|tag| !tag.is_hidden) else {
                    return Ok(Vec::new());
                };
                query = query.filter(
                    events::id.eq_any(
                        event_tags::table
                            .filter(event_tags::tag_id.eq(tag.id))
                            .select(event_tags::event_id),
                    ),
                );
            }
        }

        if let Some(term) = criteria.search_term() {
            let pattern = contains_pattern(term);
            let translated = event_translations::table
                .filter(event_translations::locale.eq(criteria.locale.code()))
                .filter(
                    fold_case(event_translations::title)
                        .like(pattern.clone())
                        .escape('\\'),
                )
                .select(event_translations::event_id);
            query = query.filter(
                fold_case(events::title)
                    .like(pattern)
                    .escape('\\')
                    .or(events::id.eq_any(translated)),
            );
        }

        if criteria.bookmarked {
            let user = criteria
                .user_id
                .as_ref()
                .map(|u| u.as_str().to_string())
                .unwrap_or_default();
            query = query.filter(
                events::id.eq_any(
                    bookmarks::table
                        .filter(bookmarks::user_id.eq(user))
                        .select(bookmarks::event_id),
                ),
            );
        }

        if criteria.frequency != Frequency::All {
            query = query.filter(events::recurrence.eq(criteria.frequency.as_str()));
        }

        let excluded: Vec<i32> = [
            (criteria.hide_sports, TAG_SPORTS),
            (criteria.hide_crypto, TAG_CRYPTO),
            (criteria.hide_earnings, TAG_EARNINGS),
        ]
        .into_iter()
        .filter(|(hide, _)| *hide)
        .filter_map(|(_, slug)| tag_index.get(slug).map(|tag| tag.id))
        .collect();
        if !excluded.is_empty() {
            query = query.filter(
                events::id.ne_all(
                    event_tags::table
                        .filter(event_tags::tag_id.eq_any(excluded))
                        .select(event_tags::event_id),
                ),
            );
        }
        if criteria.hide_sports {
            query = query.filter(events::sports_sport_slug.is_null());
        }

        let rows: Vec<EventRow> = query
            .select(EventRow::as_select())
            .load(conn)
            .map_err(db_err)?;

        Self::localize(conn, rows, criteria.locale)
    }

    /// Convert rows, replacing titles with `locale` translations when present.
    fn localize(
        conn: &mut SqliteConnection,
        rows: Vec<EventRow>,
        locale: Locale,
    ) -> Result<Vec<Event>> {
        let translations: HashMap<String, String> = if locale.is_default() || rows.is_empty() {
            HashMap::new()
        } else {
            let ids: Vec<&str> = rows.iter().map(|row| row.id.as_str()).collect();
            event_translations::table
                .filter(event_translations::locale.eq(locale.code()))
                .filter(event_translations::event_id.eq_any(ids))
                .select((event_translations::event_id, event_translations::title))
                .load::<(String, String)>(conn)
                .map_err(db_err)?
                .into_iter()
                .collect()
        };

        rows.into_iter()
            .map(|row| {
                let mut event = event_from_row(row)?;
                if let Some(title) = translations.get(event.id.as_str()) {
                    event.title.clone_from(title);
                }
                Ok(event)
            })
            .collect()
    }

    fn id_strings(event_ids: &[EventId]) -> Vec<String> {
        event_ids.iter().map(|id| id.as_str().to_string()).collect()
    }
}

#[async_trait]
impl EventStore for SqliteEventStore {
    async fn find_candidates(&self, criteria: &ListCriteria) -> Result<Vec<Event>> {
        let criteria = criteria.clone();
        let cache = Arc::clone(&self.tags);
        with_connection(&self.pool, move |conn| {
            Self::query_candidates(conn, &cache, &criteria)
        })
        .await
    }

    async fn load_markets(&self, event_ids: &[EventId]) -> Result<Vec<Market>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = Self::id_strings(event_ids);
        with_connection(&self.pool, move |conn| {
            let rows: Vec<MarketRow> = markets::table
                .filter(markets::event_id.eq_any(ids))
                .order((markets::created_at.asc(), markets::condition_id.asc()))
                .select(MarketRow::as_select())
                .load(conn)
                .map_err(db_err)?;
            rows.into_iter().map(market_from_row).collect()
        })
        .await
    }

    async fn load_event_tags(&self, event_ids: &[EventId]) -> Result<Vec<(EventId, String)>> {
        if event_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids = Self::id_strings(event_ids);
        with_connection(&self.pool, move |conn| {
            let pairs: Vec<(String, String)> = event_tags::table
                .inner_join(tags::table)
                .filter(event_tags::event_id.eq_any(ids))
                .filter(tags::is_hidden.eq(false))
                .order((
                    event_tags::event_id.asc(),
                    tags::display_order.asc(),
                    tags::slug.asc(),
                ))
                .select((event_tags::event_id, tags::slug))
                .load(conn)
                .map_err(db_err)?;
            Ok(pairs
                .into_iter()
                .map(|(event_id, slug)| (EventId::from(event_id), slug))
                .collect())
        })
        .await
    }

    async fn load_bookmarks(
        &self,
        user_id: &UserId,
        event_ids: &[EventId],
    ) -> Result<HashSet<EventId>> {
        if event_ids.is_empty() {
            return Ok(HashSet::new());
        }
        let ids = Self::id_strings(event_ids);
        let user = user_id.as_str().to_string();
        with_connection(&self.pool, move |conn| {
            let bookmarked: Vec<String> = bookmarks::table
                .filter(bookmarks::user_id.eq(user))
                .filter(bookmarks::event_id.eq_any(ids))
                .select(bookmarks::event_id)
                .load(conn)
                .map_err(db_err)?;
            Ok(bookmarked.into_iter().map(EventId::from).collect())
        })
        .await
    }

    async fn find_by_slug(&self, slug: &str, locale: Locale) -> Result<Option<Event>> {
        let slug = slug.to_string();
        with_connection(&self.pool, move |conn| {
            let row: Option<EventRow> = events::table
                .filter(events::slug.eq(slug))
                .select(EventRow::as_select())
                .first(conn)
                .optional()
                .map_err(db_err)?;
            match row {
                Some(row) => Ok(Self::localize(conn, vec![row], locale)?.pop()),
                None => Ok(None),
            }
        })
        .await
    }

    async fn find_sharing_tags(
        &self,
        exclude: &EventId,
        tag_slugs: &[String],
        locale: Locale,
    ) -> Result<Vec<Event>> {
        let exclude = exclude.as_str().to_string();
        let tag_slugs = tag_slugs.to_vec();
        let cache = Arc::clone(&self.tags);
        with_connection(&self.pool, move |conn| {
            let index = cache.get_or_load(conn)?;
            let tag_ids: Vec<i32> = tag_slugs
                .iter()
                .filter_map(|slug| index.get(slug))
                .filter(|tag| !tag.is_hidden)
                .map(|tag| tag.id)
                .collect();
            if tag_ids.is_empty() {
                return Ok(Vec::new());
            }

            let rows: Vec<EventRow> = events::table
                .filter(events::status.eq(EventStatus::Active.as_str()))
                .filter(events::is_hidden.eq(false))
                .filter(events::id.ne(exclude))
                .filter(
                    events::id.eq_any(
                        event_tags::table
                            .filter(event_tags::tag_id.eq_any(tag_ids))
                            .select(event_tags::event_id),
                    ),
                )
                .select(EventRow::as_select())
                .load(conn)
                .map_err(db_err)?;

            Self::localize(conn, rows, locale)
        })
        .await
    }

    async fn main_tags(&self, locale: Locale) -> Result<Vec<Tag>> {
        with_connection(&self.pool, move |conn| {
            let rows: Vec<TagRow> = tags::table
                .filter(tags::is_main_category.eq(true))
                .filter(tags::is_hidden.eq(false))
                .order((tags::display_order.asc(), tags::slug.asc()))
                .select(TagRow::as_select())
                .load(conn)
                .map_err(db_err)?;

            let names: HashMap<i32, String> = if locale.is_default() || rows.is_empty() {
                HashMap::new()
            } else {
                let ids: Vec<i32> = rows.iter().map(|row| row.id).collect();
                tag_translations::table
                    .filter(tag_translations::locale.eq(locale.code()))
                    .filter(tag_translations::tag_id.eq_any(ids))
                    .select((tag_translations::tag_id, tag_translations::name))
                    .load::<(i32, String)>(conn)
                    .map_err(db_err)?
                    .into_iter()
                    .collect()
            };

            Ok(rows
                .into_iter()
                .map(|row| {
                    let mut tag = tag_from_row(row);
                    if let Some(name) = names.get(&tag.id) {
                        tag.name.clone_from(name);
                    }
                    tag
                })
                .collect())
        })
        .await
    }

    async fn set_hidden(&self, event_id: &EventId, hidden: bool) -> Result<Option<String>> {
        let id = event_id.as_str().to_string();
        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                let updated = diesel::update(events::table.find(id.as_str()))
                    .set(events::is_hidden.eq(hidden))
                    .execute(conn)?;
                if updated == 0 {
                    return Ok(None);
                }
                events::table
                    .find(id.as_str())
                    .select(events::slug)
                    .first::<String>(conn)
                    .map(Some)
            })
            .map_err(db_err)
        })
        .await
    }

    async fn update_category(
        &self,
        slug: &str,
        is_main_category: bool,
        is_hidden: bool,
    ) -> Result<bool> {
        let slug = slug.to_string();
        with_connection(&self.pool, move |conn| {
            let updated = diesel::update(tags::table.filter(tags::slug.eq(slug)))
                .set((
                    tags::is_main_category.eq(is_main_category),
                    tags::is_hidden.eq(is_hidden),
                ))
                .execute(conn)
                .map_err(db_err)?;
            Ok(updated > 0)
        })
        .await
    }

    fn reset_tag_cache(&self) {
        self.tags.reset();
    }
}
