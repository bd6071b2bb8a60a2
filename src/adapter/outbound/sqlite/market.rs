//! SQLite market store implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use diesel::prelude::*;

use super::convert::{contains_pattern, decimal};
use super::database::connection::{db_err, fold_case, with_connection, DbPool};
use super::database::schema::{events, markets};
use crate::domain::id::ConditionId;
use crate::domain::market::{MarketSearchHit, MarketStatus};
use crate::error::Result;
use crate::port::outbound::market::MarketStore;

type SearchRow = (String, String, String, String, String, Option<String>, f64);

/// SQLite-backed market store.
pub struct SqliteMarketStore {
    pool: DbPool,
}

impl SqliteMarketStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MarketStore for SqliteMarketStore {
    async fn search(&self, term: &str, limit: usize) -> Result<Vec<MarketSearchHit>> {
        let pattern = contains_pattern(term);
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        with_connection(&self.pool, move |conn| {
            let rows: Vec<SearchRow> = markets::table
                .inner_join(events::table)
                .filter(events::is_hidden.eq(false))
                .filter(fold_case(markets::title).like(pattern).escape('\\'))
                .order((markets::volume.desc(), markets::condition_id.asc()))
                .limit(limit)
                .select((
                    markets::condition_id,
                    markets::slug,
                    markets::title,
                    events::slug,
                    events::title,
                    events::icon_url,
                    markets::volume,
                ))
                .load(conn)
                .map_err(db_err)?;

            Ok(rows
                .into_iter()
                .map(
                    |(condition_id, slug, title, event_slug, event_title, icon_url, volume)| {
                        MarketSearchHit {
                            condition_id: ConditionId::new(&condition_id),
                            slug,
                            title,
                            event_slug,
                            event_title,
                            icon_url,
                            volume: decimal(volume),
                        }
                    },
                )
                .collect())
        })
        .await
    }

    async fn statuses(&self, condition_ids: &[ConditionId]) -> Result<Vec<MarketStatus>> {
        if condition_ids.is_empty() {
            return Ok(Vec::new());
        }
        let requested = condition_ids.to_vec();
        with_connection(&self.pool, move |conn| {
            let ids: Vec<&str> = requested.iter().map(ConditionId::as_str).collect();
            let found: HashMap<String, bool> = markets::table
                .filter(fold_case(markets::condition_id).eq_any(ids))
                .select((markets::condition_id, markets::is_resolved))
                .load::<(String, bool)>(conn)
                .map_err(db_err)?
                .into_iter()
                .map(|(id, resolved)| (id.to_ascii_lowercase(), resolved))
                .collect();

            Ok(requested
                .into_iter()
                .filter_map(|condition_id| {
                    found.get(condition_id.as_str()).map(|&is_resolved| MarketStatus {
                        condition_id,
                        is_resolved,
                    })
                })
                .collect())
        })
        .await
    }
}
