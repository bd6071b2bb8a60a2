//! Event domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::id::EventId;
use super::market::Market;

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    #[default]
    Active,
    Resolved,
}

impl EventStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Resolved => "resolved",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "resolved" => Ok(Self::Resolved),
            other => Err(DomainError::InvalidStatus {
                value: other.to_string(),
            }),
        }
    }
}

/// Section of a sport vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SportsSection {
    Games,
    Props,
}

impl SportsSection {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Games => "games",
            Self::Props => "props",
        }
    }
}

impl FromStr for SportsSection {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "games" => Ok(Self::Games),
            "props" => Ok(Self::Props),
            other => Err(DomainError::InvalidSportsSection {
                value: other.to_string(),
            }),
        }
    }
}

/// Routing attributes for events that live under a sport vertical.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SportsRoute {
    pub sport_slug: String,
    pub event_slug: Option<String>,
    pub section: Option<SportsSection>,
}

/// A trading topic composed of one or more markets.
///
/// `title` holds the title in the requested locale when a translation
/// exists, otherwise the source title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub slug: String,
    pub title: String,
    pub status: EventStatus,
    pub icon_url: Option<String>,
    /// Recurrence descriptor such as `daily`, `30m`, or free text.
    pub recurrence: Option<String>,
    pub is_bookmarked: bool,
    pub is_hidden: bool,
    pub sports: Option<SportsRoute>,
    pub volume: Decimal,
    pub volume_24h: Decimal,
    pub tags: Vec<String>,
    pub markets: Vec<Market>,
    pub created_at: DateTime<Utc>,
}
