//! SQLite settings store implementation.

use async_trait::async_trait;
use diesel::prelude::*;

use super::convert::parse_timestamp;
use super::database::connection::{db_err, with_connection, DbPool};
use super::database::model::SettingRow;
use super::database::schema::settings;
use crate::domain::settings::{SettingsEntry, SettingsSnapshot};
use crate::error::Result;
use crate::port::outbound::settings::SettingsStore;

/// SQLite-backed settings store.
pub struct SqliteSettingsStore {
    pool: DbPool,
}

impl SqliteSettingsStore {
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(entry: SettingsEntry) -> SettingRow {
        SettingRow {
            group_name: entry.group,
            key: entry.key,
            value: entry.value,
            updated_at: entry.updated_at.to_rfc3339(),
        }
    }

    fn from_row(row: SettingRow) -> Result<SettingsEntry> {
        Ok(SettingsEntry {
            updated_at: parse_timestamp(&row.updated_at)?,
            group: row.group_name,
            key: row.key,
            value: row.value,
        })
    }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
    async fn load(&self) -> Result<SettingsSnapshot> {
        with_connection(&self.pool, |conn| {
            let rows: Vec<SettingRow> = settings::table
                .select(SettingRow::as_select())
                .load(conn)
                .map_err(db_err)?;
            rows.into_iter().map(Self::from_row).collect()
        })
        .await
    }

    async fn upsert(&self, entries: Vec<SettingsEntry>) -> Result<()> {
        let rows: Vec<SettingRow> = entries.into_iter().map(Self::to_row).collect();
        with_connection(&self.pool, move |conn| {
            conn.transaction::<_, diesel::result::Error, _>(|conn| {
                for row in &rows {
                    diesel::replace_into(settings::table)
                        .values(row)
                        .execute(conn)?;
                }
                Ok(())
            })
            .map_err(db_err)
        })
        .await
    }
}
