//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{
    affiliates, bookmarks, event_tags, event_translations, events, markets, sessions, settings,
    tag_translations, tags,
};

/// Database row for an event.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventRow {
    pub id: String,
    pub slug: String,
    pub title: String,
    pub status: String,
    pub icon_url: Option<String>,
    pub recurrence: Option<String>,
    pub is_hidden: bool,
    pub sports_sport_slug: Option<String>,
    pub sports_event_slug: Option<String>,
    pub sports_section: Option<String>,
    pub volume: f64,
    pub volume_24h: f64,
    pub created_at: String,
}

/// Database row for a localized event title.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = event_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventTranslationRow {
    pub event_id: String,
    pub locale: String,
    pub title: String,
}

/// Database row for a market.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = markets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MarketRow {
    pub condition_id: String,
    pub event_id: String,
    pub slug: String,
    pub title: String,
    pub short_title: Option<String>,
    pub best_bid: Option<f64>,
    pub best_ask: Option<f64>,
    pub last_trade_price: Option<f64>,
    pub volume: f64,
    pub is_resolved: bool,
    pub created_at: String,
}

/// Database row for a tag.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TagRow {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub is_main_category: bool,
    pub is_hidden: bool,
    pub display_order: i32,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = tag_translations)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TagTranslationRow {
    pub tag_id: i32,
    pub locale: String,
    pub name: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = event_tags)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct EventTagRow {
    pub event_id: String,
    pub tag_id: i32,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = bookmarks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BookmarkRow {
    pub user_id: String,
    pub event_id: String,
}

/// Database row for a setting.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = settings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SettingRow {
    pub group_name: String,
    pub key: String,
    pub value: String,
    pub updated_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = affiliates)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct AffiliateRow {
    pub code: String,
    pub user_id: String,
    pub created_at: String,
}

#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = sessions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SessionRow {
    pub token: String,
    pub user_id: String,
    pub is_admin: bool,
    pub expires_at: String,
}
