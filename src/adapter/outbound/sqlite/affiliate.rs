//! SQLite affiliate store implementation.

use async_trait::async_trait;
use diesel::prelude::*;

use super::convert::parse_timestamp;
use super::database::connection::{db_err, with_connection, DbPool};
use super::database::model::AffiliateRow;
use super::database::schema::affiliates;
use crate::domain::affiliate::Affiliate;
use crate::domain::id::UserId;
use crate::error::Result;
use crate::port::outbound::affiliate::AffiliateStore;

pub struct SqliteAffiliateStore {
    pool: DbPool,
}

impl SqliteAffiliateStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AffiliateStore for SqliteAffiliateStore {
    async fn find_by_code(&self, code: &str) -> Result<Option<Affiliate>> {
        let code = code.to_string();
        with_connection(&self.pool, move |conn| {
            let row: Option<AffiliateRow> = affiliates::table
                .find(code)
                .select(AffiliateRow::as_select())
                .first(conn)
                .optional()
                .map_err(db_err)?;
            row.map(|row| {
                Ok(Affiliate {
                    created_at: parse_timestamp(&row.created_at)?,
                    code: row.code,
                    user_id: UserId::new(row.user_id),
                })
            })
            .transpose()
        })
        .await
    }
}
