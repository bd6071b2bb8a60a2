//! Listing, ranking, and response cache settings.

use serde::Deserialize;

use crate::application::listing::{ListingLimits, DEFAULT_PAGE_SIZE, DEFAULT_RELATED_LIMIT};
use crate::application::ranking::DEFAULT_TRENDING_HALF_LIFE_HOURS;

#[derive(Debug, Clone, Deserialize)]
pub struct ListingConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,
    /// Half-life of the trending decay, in hours.
    #[serde(default = "default_trending_half_life_hours")]
    pub trending_half_life_hours: f64,
    #[serde(default = "default_cache_ttl_secs")]
    pub response_cache_ttl_secs: u64,
    /// Zero disables response caching.
    #[serde(default = "default_cache_max_entries")]
    pub response_cache_max_entries: usize,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_related_limit() -> usize {
    DEFAULT_RELATED_LIMIT
}

fn default_trending_half_life_hours() -> f64 {
    DEFAULT_TRENDING_HALF_LIFE_HOURS
}

fn default_cache_ttl_secs() -> u64 {
    300
}

fn default_cache_max_entries() -> usize {
    10_000
}

impl ListingConfig {
    #[must_use]
    pub const fn limits(&self) -> ListingLimits {
        ListingLimits {
            page_size: self.page_size,
            related_limit: self.related_limit,
        }
    }
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            related_limit: default_related_limit(),
            trending_half_life_hours: default_trending_half_life_hours(),
            response_cache_ttl_secs: default_cache_ttl_secs(),
            response_cache_max_entries: default_cache_max_entries(),
        }
    }
}
