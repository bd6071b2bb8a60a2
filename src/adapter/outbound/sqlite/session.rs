//! SQLite session store implementation.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;

use super::convert::parse_timestamp;
use super::database::connection::{db_err, with_connection, DbPool};
use super::database::model::SessionRow;
use super::database::schema::sessions;
use crate::domain::id::UserId;
use crate::domain::viewer::Viewer;
use crate::error::Result;
use crate::port::outbound::session::SessionStore;

pub struct SqliteSessionStore {
    pool: DbPool,
}

impl SqliteSessionStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionStore for SqliteSessionStore {
    async fn resolve(&self, token: &str) -> Result<Option<Viewer>> {
        let token = token.to_string();
        with_connection(&self.pool, move |conn| {
            let row: Option<SessionRow> = sessions::table
                .find(token)
                .select(SessionRow::as_select())
                .first(conn)
                .optional()
                .map_err(db_err)?;

            let Some(row) = row else {
                return Ok(None);
            };
            if parse_timestamp(&row.expires_at)? <= Utc::now() {
                return Ok(None);
            }
            Ok(Some(Viewer {
                user_id: Some(UserId::new(row.user_id)),
                is_admin: row.is_admin,
            }))
        })
        .await
    }
}
