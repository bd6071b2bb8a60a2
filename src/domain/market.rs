//! Market-related domain types.
//!
//! - [`Market`] - A single question within an event, with its price fields
//! - [`MarketSearchHit`] - A market matched by free-text search
//! - [`MarketStatus`] - Resolution flag for a condition id

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::id::{ConditionId, EventId};

/// A yes/no (or multi-outcome) question within an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub condition_id: ConditionId,
    #[serde(skip)]
    pub event_id: EventId,
    pub slug: String,
    pub title: String,
    pub short_title: Option<String>,
    pub best_bid: Option<Decimal>,
    pub best_ask: Option<Decimal>,
    pub midpoint: Option<Decimal>,
    pub last_trade_price: Option<Decimal>,
    pub volume: Decimal,
    pub is_resolved: bool,
    pub created_at: DateTime<Utc>,
}

impl Market {
    /// Midpoint of the best bid and ask, when both sides are quoted.
    #[must_use]
    pub fn midpoint_of(best_bid: Option<Decimal>, best_ask: Option<Decimal>) -> Option<Decimal> {
        match (best_bid, best_ask) {
            (Some(bid), Some(ask)) => Some((bid + ask) / Decimal::TWO),
            _ => None,
        }
    }
}

/// A market returned by free-text search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSearchHit {
    pub condition_id: ConditionId,
    pub slug: String,
    pub title: String,
    pub event_slug: String,
    pub event_title: String,
    pub icon_url: Option<String>,
    pub volume: Decimal,
}

/// Resolution state of a market, keyed by condition id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatus {
    pub condition_id: ConditionId,
    pub is_resolved: bool,
}
