//! Builders for stored rows.
//!
//! Defaults describe an active, visible event created an hour ago with no
//! volume, so each test only states the fields it asserts on.

use chrono::{DateTime, Duration, Utc};

use crate::adapter::outbound::sqlite::database::model::{
    EventRow, EventTranslationRow, MarketRow, TagRow, TagTranslationRow,
};
use crate::domain::event::{EventStatus, SportsSection};
use crate::domain::locale::Locale;

#[derive(Debug, Clone)]
pub struct EventFixture {
    pub(crate) row: EventRow,
    pub(crate) markets: Vec<MarketRow>,
    pub(crate) translations: Vec<EventTranslationRow>,
    pub(crate) tags: Vec<String>,
}

impl EventFixture {
    pub fn new(id: &str, slug: &str) -> Self {
        Self {
            row: EventRow {
                id: id.to_string(),
                slug: slug.to_string(),
                title: slug.to_string(),
                status: EventStatus::Active.as_str().to_string(),
                icon_url: None,
                recurrence: None,
                is_hidden: false,
                sports_sport_slug: None,
                sports_event_slug: None,
                sports_section: None,
                volume: 0.0,
                volume_24h: 0.0,
                created_at: (Utc::now() - Duration::hours(1)).to_rfc3339(),
            },
            markets: Vec::new(),
            translations: Vec::new(),
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.row.title = title.to_string();
        self
    }

    #[must_use]
    pub fn status(mut self, status: EventStatus) -> Self {
        self.row.status = status.as_str().to_string();
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.row.is_hidden = true;
        self
    }

    #[must_use]
    pub fn volume(mut self, volume: f64) -> Self {
        self.row.volume = volume;
        self
    }

    #[must_use]
    pub fn volume_24h(mut self, volume: f64) -> Self {
        self.row.volume_24h = volume;
        self
    }

    #[must_use]
    pub fn created_at(mut self, at: DateTime<Utc>) -> Self {
        self.row.created_at = at.to_rfc3339();
        self
    }

    #[must_use]
    pub fn created_hours_ago(self, hours: i64) -> Self {
        self.created_at(Utc::now() - Duration::hours(hours))
    }

    #[must_use]
    pub fn recurrence(mut self, recurrence: &str) -> Self {
        self.row.recurrence = Some(recurrence.to_string());
        self
    }

    #[must_use]
    pub fn sports(mut self, sport_slug: &str, section: Option<SportsSection>) -> Self {
        self.row.sports_sport_slug = Some(sport_slug.to_string());
        self.row.sports_section = section.map(|s| s.as_str().to_string());
        self
    }

    #[must_use]
    pub fn tag(mut self, slug: &str) -> Self {
        self.tags.push(slug.to_string());
        self
    }

    #[must_use]
    pub fn translation(mut self, locale: Locale, title: &str) -> Self {
        self.translations.push(EventTranslationRow {
            event_id: self.row.id.clone(),
            locale: locale.code().to_string(),
            title: title.to_string(),
        });
        self
    }

    /// Open market quoted at `bid`/`ask`.
    #[must_use]
    pub fn market(mut self, condition_id: &str, bid: f64, ask: f64) -> Self {
        let market = self.market_row(condition_id, false);
        self.markets.push(MarketRow {
            best_bid: Some(bid),
            best_ask: Some(ask),
            ..market
        });
        self
    }

    #[must_use]
    pub fn resolved_market(mut self, condition_id: &str) -> Self {
        let market = self.market_row(condition_id, true);
        self.markets.push(market);
        self
    }

    fn market_row(&self, condition_id: &str, is_resolved: bool) -> MarketRow {
        MarketRow {
            condition_id: condition_id.to_string(),
            event_id: self.row.id.clone(),
            slug: format!("{}-{}", self.row.slug, self.markets.len()),
            title: format!("{} market {}", self.row.title, self.markets.len()),
            short_title: None,
            best_bid: None,
            best_ask: None,
            last_trade_price: None,
            volume: 0.0,
            is_resolved,
            created_at: self.row.created_at.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TagFixture {
    pub(crate) row: TagRow,
    pub(crate) translations: Vec<TagTranslationRow>,
}

impl TagFixture {
    pub fn new(id: i32, slug: &str) -> Self {
        Self {
            row: TagRow {
                id,
                slug: slug.to_string(),
                name: slug.to_string(),
                is_main_category: false,
                is_hidden: false,
                display_order: id,
            },
            translations: Vec::new(),
        }
    }

    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.row.name = name.to_string();
        self
    }

    #[must_use]
    pub fn main(mut self) -> Self {
        self.row.is_main_category = true;
        self
    }

    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.row.is_hidden = true;
        self
    }

    #[must_use]
    pub fn display_order(mut self, order: i32) -> Self {
        self.row.display_order = order;
        self
    }

    #[must_use]
    pub fn translation(mut self, locale: Locale, name: &str) -> Self {
        self.translations.push(TagTranslationRow {
            tag_id: self.row.id,
            locale: locale.code().to_string(),
            name: name.to_string(),
        });
        self
    }
}
