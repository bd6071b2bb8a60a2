//! Market search and status lookups.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::debug;

use crate::domain::id::ConditionId;
use crate::domain::market::{MarketSearchHit, MarketStatus};
use crate::error::Result;
use crate::port::outbound::market::MarketStore;

/// Shortest query that reaches storage, in characters.
pub const MIN_QUERY_CHARS: usize = 2;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const MAX_SEARCH_LIMIT: usize = 20;
/// Most condition ids looked up by one status request.
pub const MAX_STATUS_IDS: usize = 500;

pub struct MarketService {
    store: Arc<dyn MarketStore>,
}

impl MarketService {
    #[must_use]
    pub fn new(store: Arc<dyn MarketStore>) -> Self {
        Self { store }
    }

    /// Search markets by title. Queries shorter than [`MIN_QUERY_CHARS`]
    /// return nothing without touching storage.
    pub async fn search(&self, query: &str, limit: Option<i64>) -> Result<Vec<MarketSearchHit>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(Vec::new());
        }
        let limit = clamp_search_limit(limit);
        let hits = self.store.search(query, limit).await?;
        debug!(query, limit, hits = hits.len(), "Market search");
        Ok(hits)
    }

    /// Resolution flags for the known ids among `raw_ids`.
    pub async fn statuses<S: AsRef<str> + Sync>(&self, raw_ids: &[S]) -> Result<Vec<MarketStatus>> {
        let ids = normalize_condition_ids(raw_ids);
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.store.statuses(&ids).await
    }
}

#[must_use]
pub fn clamp_search_limit(limit: Option<i64>) -> usize {
    match limit {
        None => DEFAULT_SEARCH_LIMIT,
        Some(n) if n < 1 => 1,
        Some(n) => usize::try_from(n).map_or(MAX_SEARCH_LIMIT, |n| n.min(MAX_SEARCH_LIMIT)),
    }
}

/// Trim, lower-case, drop blanks and duplicates (first occurrence wins),
/// and cap at [`MAX_STATUS_IDS`].
#[must_use]
pub fn normalize_condition_ids<S: AsRef<str>>(raw_ids: &[S]) -> Vec<ConditionId> {
    let mut seen = HashSet::new();
    raw_ids
        .iter()
        .map(ConditionId::new)
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(id.clone()))
        .take(MAX_STATUS_IDS)
        .collect()
}
