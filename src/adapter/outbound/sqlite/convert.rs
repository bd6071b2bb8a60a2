//! Row-to-domain conversions shared by the SQLite stores.

use chrono::{DateTime, Utc};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;

use super::database::model::{EventRow, MarketRow};
use crate::domain::event::{Event, EventStatus, SportsRoute};
use crate::domain::id::{ConditionId, EventId};
use crate::domain::market::Market;
use crate::error::{Error, Result};

pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| Error::Parse(format!("timestamp '{value}': {e}")))
}

/// Stored REAL to decimal. Non-finite values read as zero.
pub(crate) fn decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

pub(crate) fn decimal_opt(value: Option<f64>) -> Option<Decimal> {
    value.and_then(Decimal::from_f64)
}

pub(crate) fn to_f64(value: Decimal) -> f64 {
    value.to_f64().unwrap_or_default()
}

pub(crate) fn event_from_row(row: EventRow) -> Result<Event> {
    let status: EventStatus = row
        .status
        .parse()
        .map_err(|e: crate::domain::error::DomainError| Error::Parse(e.to_string()))?;
    let created_at = parse_timestamp(&row.created_at)?;
    let sports = row.sports_sport_slug.map(|sport_slug| SportsRoute {
        sport_slug,
        event_slug: row.sports_event_slug,
        section: row.sports_section.and_then(|s| s.parse().ok()),
    });

    Ok(Event {
        id: EventId::from(row.id),
        slug: row.slug,
        title: row.title,
        status,
        icon_url: row.icon_url,
        recurrence: row.recurrence,
        is_bookmarked: false,
        is_hidden: row.is_hidden,
        sports,
        volume: decimal(row.volume),
        volume_24h: decimal(row.volume_24h),
        tags: Vec::new(),
        markets: Vec::new(),
        created_at,
    })
}

pub(crate) fn market_from_row(row: MarketRow) -> Result<Market> {
    let best_bid = decimal_opt(row.best_bid);
    let best_ask = decimal_opt(row.best_ask);
    Ok(Market {
        condition_id: ConditionId::new(&row.condition_id),
        event_id: EventId::from(row.event_id),
        slug: row.slug,
        title: row.title,
        short_title: row.short_title,
        best_bid,
        best_ask,
        midpoint: Market::midpoint_of(best_bid, best_ask),
        last_trade_price: decimal_opt(row.last_trade_price),
        volume: decimal(row.volume),
        is_resolved: row.is_resolved,
        created_at: parse_timestamp(&row.created_at)?,
    })
}

/// LIKE pattern matching `term` anywhere, with `%`, `_` and `\` escaped.
///
/// The term is lower-cased; match it against a `fold_case` column.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
