//! Category tags and the synthetic listing tags.

use serde::Serialize;

pub const TAG_TRENDING: &str = "trending";
pub const TAG_NEW: &str = "new";
pub const TAG_SPORTS: &str = "sports";
pub const TAG_CRYPTO: &str = "crypto";
pub const TAG_EARNINGS: &str = "earnings";

/// A category label stored in the tag table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: i32,
    pub slug: String,
    pub name: String,
    pub is_main_category: bool,
    pub is_hidden: bool,
    pub display_order: i32,
}

/// How a listing request's `tag` parameter is interpreted.
///
/// `trending` and `new` are ranking modes, not rows in the tag table.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ListingTag {
    Trending,
    New,
    Sports,
    Category(String),
}

impl ListingTag {
    /// Interpret a tag slug. Blank input means trending.
    #[must_use]
    pub fn from_slug(slug: &str) -> Self {
        match slug.trim() {
            "" | TAG_TRENDING => Self::Trending,
            TAG_NEW => Self::New,
            TAG_SPORTS => Self::Sports,
            other => Self::Category(other.to_string()),
        }
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        match self {
            Self::Trending => TAG_TRENDING,
            Self::New => TAG_NEW,
            Self::Sports => TAG_SPORTS,
            Self::Category(slug) => slug,
        }
    }

    /// True for ranking-only tags that apply no category filter.
    #[must_use]
    pub const fn is_synthetic(&self) -> bool {
        matches!(self, Self::Trending | Self::New)
    }
}
