//! Temporary SQLite databases for tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Duration, Utc};
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, PooledConnection};
use diesel::SqliteConnection;

use super::fixture::{EventFixture, TagFixture};
use crate::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use crate::adapter::outbound::sqlite::database::model::{
    AffiliateRow, BookmarkRow, EventTagRow, SessionRow, SettingRow,
};
use crate::adapter::outbound::sqlite::database::schema::{
    affiliates, bookmarks, event_tags, event_translations, events, markets, sessions, settings,
    tag_translations, tags,
};
use crate::application::context::AppContext;
use crate::infrastructure::bootstrap::build_context;
use crate::infrastructure::config::settings::Config;

static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// Migrated SQLite database in the system temp directory.
///
/// The file is removed on drop.
pub struct TempDb {
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let mut path = std::env::temp_dir();
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        path.push(format!("eventfeed-{name}-{nanos}-{seq}.db"));

        let pool = create_pool(&path.display().to_string(), 4).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self { path, pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    /// Application context over this database with default configuration.
    pub fn context(&self) -> AppContext {
        self.context_with(&Config::default())
    }

    pub fn context_with(&self, config: &Config) -> AppContext {
        build_context(config, self.pool.clone())
    }

    fn conn(&self) -> PooledConnection<ConnectionManager<SqliteConnection>> {
        self.pool.get().expect("get sqlite connection")
    }

    pub fn insert_tag(&self, fixture: TagFixture) {
        let mut conn = self.conn();
        diesel::insert_into(tags::table)
            .values(&fixture.row)
            .execute(&mut conn)
            .expect("insert tag");
        if !fixture.translations.is_empty() {
            diesel::insert_into(tag_translations::table)
                .values(&fixture.translations)
                .execute(&mut conn)
                .expect("insert tag translations");
        }
    }

    /// Insert an event with its markets, translations, and tag links.
    ///
    /// Tags are referenced by slug and must already exist.
    pub fn insert_event(&self, fixture: EventFixture) {
        let mut conn = self.conn();
        diesel::insert_into(events::table)
            .values(&fixture.row)
            .execute(&mut conn)
            .expect("insert event");

        if !fixture.markets.is_empty() {
            diesel::insert_into(markets::table)
                .values(&fixture.markets)
                .execute(&mut conn)
                .expect("insert markets");
        }
        if !fixture.translations.is_empty() {
            diesel::insert_into(event_translations::table)
                .values(&fixture.translations)
                .execute(&mut conn)
                .expect("insert event translations");
        }

        let links: Vec<EventTagRow> = fixture
            .tags
            .iter()
            .map(|slug| {
                let tag_id: i32 = tags::table
                    .filter(tags::slug.eq(slug))
                    .select(tags::id)
                    .first(&mut conn)
                    .unwrap_or_else(|_| panic!("tag '{slug}' must be inserted first"));
                EventTagRow {
                    event_id: fixture.row.id.clone(),
                    tag_id,
                }
            })
            .collect();
        if !links.is_empty() {
            diesel::insert_into(event_tags::table)
                .values(&links)
                .execute(&mut conn)
                .expect("insert event tags");
        }
    }

    pub fn bookmark(&self, user_id: &str, event_id: &str) {
        diesel::insert_into(bookmarks::table)
            .values(&BookmarkRow {
                user_id: user_id.to_string(),
                event_id: event_id.to_string(),
            })
            .execute(&mut self.conn())
            .expect("insert bookmark");
    }

    /// Session valid for one hour from now.
    pub fn session(&self, token: &str, user_id: &str, is_admin: bool) {
        self.session_expiring(token, user_id, is_admin, Utc::now() + Duration::hours(1));
    }

    pub fn session_expiring(
        &self,
        token: &str,
        user_id: &str,
        is_admin: bool,
        expires_at: DateTime<Utc>,
    ) {
        diesel::insert_into(sessions::table)
            .values(&SessionRow {
                token: token.to_string(),
                user_id: user_id.to_string(),
                is_admin,
                expires_at: expires_at.to_rfc3339(),
            })
            .execute(&mut self.conn())
            .expect("insert session");
    }

    pub fn affiliate(&self, code: &str, user_id: &str) {
        diesel::insert_into(affiliates::table)
            .values(&AffiliateRow {
                code: code.to_string(),
                user_id: user_id.to_string(),
                created_at: Utc::now().to_rfc3339(),
            })
            .execute(&mut self.conn())
            .expect("insert affiliate");
    }

    pub fn setting(&self, group: &str, key: &str, value: &str) {
        diesel::replace_into(settings::table)
            .values(&SettingRow {
                group_name: group.to_string(),
                key: key.to_string(),
                value: value.to_string(),
                updated_at: Utc::now().to_rfc3339(),
            })
            .execute(&mut self.conn())
            .expect("upsert setting");
    }

    /// Current stored value of a setting, read directly.
    pub fn setting_value(&self, group: &str, key: &str) -> Option<String> {
        settings::table
            .filter(settings::group_name.eq(group))
            .filter(settings::key.eq(key))
            .select(settings::value)
            .first(&mut self.conn())
            .optional()
            .expect("read setting")
    }

    /// Rename an event directly, bypassing every application cache.
    pub fn rename_event(&self, event_id: &str, title: &str) {
        diesel::update(events::table.find(event_id))
            .set(events::title.eq(title))
            .execute(&mut self.conn())
            .expect("rename event");
    }
}

impl Drop for TempDb {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}
