//! Cache tags and the mutation-to-tag mapping.
//!
//! Every cached render is tagged with the tags of the entities it read.
//! Every write is described by a [`Mutation`]; [`Mutation::invalidates`] is
//! the single place that says which tags a write must drop.

use std::fmt;

use super::locale::{Locale, SUPPORTED_LOCALES};

/// An invalidation key attached to cached render outputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CacheTag {
    /// Every listing page.
    EventsAll,
    /// Listing pages of one scope (a tag slug such as `trending`).
    Events(String),
    /// One event page, by slug.
    Event(String),
    Activity(String),
    Holders(String),
    Notifications(String),
    /// Main category navigation for one locale.
    MainTags(Locale),
    AdminCategories,
    Settings,
}

impl CacheTag {
    pub fn event(slug: impl Into<String>) -> Self {
        Self::Event(slug.into())
    }

    /// Listing scope tag. The scope `all` maps onto [`CacheTag::EventsAll`].
    pub fn events(scope: impl Into<String>) -> Self {
        let scope = scope.into();
        if scope == "all" {
            Self::EventsAll
        } else {
            Self::Events(scope)
        }
    }

    pub fn activity(key: impl Into<String>) -> Self {
        Self::Activity(key.into())
    }

    pub fn holders(key: impl Into<String>) -> Self {
        Self::Holders(key.into())
    }

    pub fn notifications(key: impl Into<String>) -> Self {
        Self::Notifications(key.into())
    }
}

impl fmt::Display for CacheTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EventsAll => f.write_str("events:all"),
            Self::Events(scope) => write!(f, "events:{scope}"),
            Self::Event(slug) => write!(f, "event:{slug}"),
            Self::Activity(key) => write!(f, "activity:{key}"),
            Self::Holders(key) => write!(f, "holders:{key}"),
            Self::Notifications(key) => write!(f, "notifications:{key}"),
            Self::MainTags(locale) => write!(f, "main-tags:{locale}"),
            Self::AdminCategories => f.write_str("admin:categories"),
            Self::Settings => f.write_str("settings"),
        }
    }
}

/// A write that affects cached renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    EventVisibilityChanged { slug: String },
    AutoDeploySettingChanged,
    ThemeSettingsChanged,
    EnabledLocalesChanged,
    CategoryChanged,
    TradeRecorded { event_slug: String, market_key: String },
    NotificationCreated { user_key: String },
}

impl Mutation {
    /// Tags this mutation must invalidate.
    #[must_use]
    pub fn invalidates(&self) -> Vec<CacheTag> {
        match self {
            Self::EventVisibilityChanged { slug } => {
                vec![CacheTag::event(slug.as_str()), CacheTag::EventsAll]
            }
            Self::AutoDeploySettingChanged => vec![CacheTag::Settings, CacheTag::EventsAll],
            Self::ThemeSettingsChanged => vec![CacheTag::Settings],
            Self::EnabledLocalesChanged => {
                let mut tags = vec![CacheTag::Settings, CacheTag::EventsAll];
                tags.extend(SUPPORTED_LOCALES.iter().map(|l| CacheTag::MainTags(*l)));
                tags
            }
            Self::CategoryChanged => {
                let mut tags = vec![CacheTag::AdminCategories, CacheTag::EventsAll];
                tags.extend(SUPPORTED_LOCALES.iter().map(|l| CacheTag::MainTags(*l)));
                tags
            }
            Self::TradeRecorded {
                event_slug,
                market_key,
            } => vec![
                CacheTag::event(event_slug.as_str()),
                CacheTag::activity(market_key.as_str()),
                CacheTag::holders(market_key.as_str()),
            ],
            Self::NotificationCreated { user_key } => {
                vec![CacheTag::notifications(user_key.as_str())]
            }
        }
    }
}
