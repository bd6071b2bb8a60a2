//! Listing criteria accepted by the event repository.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::event::{EventStatus, SportsSection};
use super::id::UserId;
use super::locale::{Locale, DEFAULT_LOCALE};
use super::tag::ListingTag;

/// Recurrence class used by the frequency filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    #[default]
    All,
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Self::All),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            other => Err(DomainError::InvalidFrequency {
                value: other.to_string(),
            }),
        }
    }
}

/// Filter criteria for `list_events`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCriteria {
    pub tag: ListingTag,
    pub search: String,
    /// Viewer; `None` is anonymous.
    pub user_id: Option<UserId>,
    pub bookmarked: bool,
    pub status: EventStatus,
    pub locale: Locale,
    pub offset: usize,
    pub sports_sport_slug: Option<String>,
    pub sports_section: Option<SportsSection>,
    pub frequency: Frequency,
    pub hide_sports: bool,
    pub hide_crypto: bool,
    pub hide_earnings: bool,
    /// Include admin-hidden events. Only admin listings set this.
    pub include_hidden: bool,
}

impl Default for ListCriteria {
    fn default() -> Self {
        Self {
            tag: ListingTag::Trending,
            search: String::new(),
            user_id: None,
            bookmarked: false,
            status: EventStatus::Active,
            locale: DEFAULT_LOCALE,
            offset: 0,
            sports_sport_slug: None,
            sports_section: None,
            frequency: Frequency::All,
            hide_sports: false,
            hide_crypto: false,
            hide_earnings: false,
            include_hidden: false,
        }
    }
}

impl ListCriteria {
    #[must_use]
    pub fn for_tag(slug: &str) -> Self {
        Self {
            tag: ListingTag::from_slug(slug),
            ..Self::default()
        }
    }

    /// Search term with surrounding whitespace removed; `None` when blank.
    #[must_use]
    pub fn search_term(&self) -> Option<&str> {
        let term = self.search.trim();
        (!term.is_empty()).then_some(term)
    }

    /// True when the bookmark filter is requested without a viewer.
    #[must_use]
    pub fn requires_missing_viewer(&self) -> bool {
        self.bookmarked
            && self
                .user_id
                .as_ref()
                .map_or(true, |user| user.as_str().trim().is_empty())
    }

    /// True when the result does not depend on who is asking.
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.user_id.is_none() && !self.bookmarked && !self.include_hidden
    }

    /// Stable key identifying this request for response caching.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!(
            "events?tag={}&search={}&status={}&locale={}&offset={}&sport={}&section={}&frequency={}&hide={}{}{}",
            self.tag.slug(),
            self.search.trim().to_lowercase(),
            self.status,
            self.locale,
            self.offset,
            self.sports_sport_slug.as_deref().unwrap_or(""),
            self.sports_section.map_or("", SportsSection::as_str),
            self.frequency,
            u8::from(self.hide_sports),
            u8::from(self.hide_crypto),
            u8::from(self.hide_earnings),
        )
    }
}
