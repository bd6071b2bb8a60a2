//! Event listing use case.
//!
//! Storage narrows the candidate set, a ranking policy orders it, and only
//! the requested page is hydrated with markets, tags, and bookmark flags.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{debug, error, warn};

use super::ranking::{rank, rank_page, RankingPolicies};
use crate::domain::criteria::ListCriteria;
use crate::domain::event::Event;
use crate::domain::id::{EventId, UserId};
use crate::domain::locale::Locale;
use crate::domain::market::Market;
use crate::domain::tag::Tag;
use crate::error::{Error, Result};
use crate::port::outbound::event::EventStore;

/// Message returned to callers when listing fails for any reason.
pub const LIST_EVENTS_FAILED: &str = "Failed to load events.";

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const DEFAULT_RELATED_LIMIT: usize = 3;

/// Result of a listing call. Exactly one of `data` or `error` is set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEventsResult {
    pub data: Option<Vec<Event>>,
    pub error: Option<String>,
}

impl ListEventsResult {
    #[must_use]
    pub fn ok(events: Vec<Event>) -> Self {
        Self {
            data: Some(events),
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}

/// Listing limits.
#[derive(Debug, Clone, Copy)]
pub struct ListingLimits {
    pub page_size: usize,
    pub related_limit: usize,
}

impl Default for ListingLimits {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            related_limit: DEFAULT_RELATED_LIMIT,
        }
    }
}

pub struct EventListing {
    store: Arc<dyn EventStore>,
    rankings: RankingPolicies,
    limits: ListingLimits,
}

impl EventListing {
    #[must_use]
    pub fn new(store: Arc<dyn EventStore>, rankings: RankingPolicies, limits: ListingLimits) -> Self {
        Self {
            store,
            rankings,
            limits,
        }
    }

    #[must_use]
    pub const fn limits(&self) -> ListingLimits {
        self.limits
    }

    /// List one page of events. Never fails; storage errors are logged and
    /// replaced by [`LIST_EVENTS_FAILED`].
    pub async fn list_events(&self, criteria: &ListCriteria) -> ListEventsResult {
        match self.try_list_events(criteria).await {
            Ok(events) => ListEventsResult::ok(events),
            Err(e) => {
                error!(
                    error = %e,
                    tag = criteria.tag.slug(),
                    offset = criteria.offset,
                    "Failed to list events"
                );
                ListEventsResult::failed(LIST_EVENTS_FAILED)
            }
        }
    }

    /// Same as [`Self::list_events`] but propagates the underlying error.
    pub async fn try_list_events(&self, criteria: &ListCriteria) -> Result<Vec<Event>> {
        if criteria.requires_missing_viewer() {
            debug!("Bookmark listing without viewer, returning empty page");
            return Ok(Vec::new());
        }

        let candidates = self.store.find_candidates(criteria).await?;
        let total = candidates.len();
        let policy = self.rankings.for_tag(&criteria.tag);
        let page = rank_page(
            candidates,
            policy,
            Utc::now(),
            criteria.offset,
            self.limits.page_size,
        );

        debug!(
            tag = criteria.tag.slug(),
            policy = policy.name(),
            candidates = total,
            page = page.len(),
            "Ranked listing"
        );

        self.hydrate(page, criteria.user_id.as_ref()).await
    }

    /// Events sharing a tag with the event at `slug`.
    ///
    /// `tag` narrows the match to one tag; blank or `all` uses every tag of
    /// the source event.
    pub async fn related_events(
        &self,
        slug: &str,
        tag: Option<&str>,
        locale: Locale,
    ) -> Result<Vec<Event>> {
        let source = self
            .store
            .find_by_slug(slug, locale)
            .await?
            .filter(|event| !event.is_hidden)
            .ok_or_else(|| Error::NotFound(format!("event {slug}")))?;

        let tags: Vec<String> = match tag.map(str::trim).filter(|t| !t.is_empty() && *t != "all")
        {
            Some(tag) => vec![tag.to_string()],
            None => self
                .store
                .load_event_tags(std::slice::from_ref(&source.id))
                .await?
                .into_iter()
                .map(|(_, slug)| slug)
                .collect(),
        };
        if tags.is_empty() {
            return Ok(Vec::new());
        }

        let candidates = self
            .store
            .find_sharing_tags(&source.id, &tags, locale)
            .await?;
        let mut related = rank(candidates, self.rankings.by_volume(), Utc::now());
        related.truncate(self.limits.related_limit);

        self.hydrate(related, None).await
    }

    pub async fn main_tags(&self, locale: Locale) -> Result<Vec<Tag>> {
        self.store.main_tags(locale).await
    }

    async fn hydrate(&self, mut events: Vec<Event>, viewer: Option<&UserId>) -> Result<Vec<Event>> {
        if events.is_empty() {
            return Ok(events);
        }
        let ids: Vec<EventId> = events.iter().map(|e| e.id.clone()).collect();

        let mut markets = group_markets(self.store.load_markets(&ids).await?);

        let mut tags: HashMap<EventId, Vec<String>> = HashMap::new();
        match self.store.load_event_tags(&ids).await {
            Ok(pairs) => {
                for (event_id, slug) in pairs {
                    tags.entry(event_id).or_default().push(slug);
                }
            }
            Err(e) => warn!(error = %e, "Failed to load event tags, rendering without them"),
        }

        let bookmarks = match viewer {
            Some(user) => match self.store.load_bookmarks(user, &ids).await {
                Ok(set) => set,
                Err(e) => {
                    warn!(error = %e, user = %user, "Failed to load bookmarks");
                    HashSet::new()
                }
            },
            None => HashSet::new(),
        };

        for event in &mut events {
            event.markets = markets.remove(&event.id).unwrap_or_default();
            event.tags = tags.remove(&event.id).unwrap_or_default();
            event.is_bookmarked = bookmarks.contains(&event.id);
        }
        Ok(events)
    }
}

fn group_markets(markets: Vec<Market>) -> HashMap<EventId, Vec<Market>> {
    let mut grouped: HashMap<EventId, Vec<Market>> = HashMap::new();
    for market in markets {
        grouped.entry(market.event_id.clone()).or_default().push(market);
    }
    grouped
}
