//! Ranking policies for event listings.
//!
//! Storage filters the candidate set; a [`RankingPolicy`] orders it. Each
//! listing tag maps onto one policy through [`RankingPolicies::for_tag`].
//!
//! Scores are computed in process, so every page request loads and scores
//! the full filtered candidate set. [`rank_page`] bounds the sort to the
//! requested window, but the load stays linear in the number of matching
//! events.

use std::cmp::Ordering;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;

use crate::domain::event::Event;
use crate::domain::tag::ListingTag;

/// Default half-life for the trending decay.
pub const DEFAULT_TRENDING_HALF_LIFE_HOURS: f64 = 48.0;

/// Scores events; higher ranks first.
pub trait RankingPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    fn score(&self, event: &Event, now: DateTime<Utc>) -> f64;
}

/// 24h volume decayed by event age.
#[derive(Debug, Clone, Copy)]
pub struct TrendingRanking {
    half_life_hours: f64,
}

impl TrendingRanking {
    #[must_use]
    pub fn new(half_life_hours: f64) -> Self {
        Self { half_life_hours }
    }
}

impl Default for TrendingRanking {
    fn default() -> Self {
        Self::new(DEFAULT_TRENDING_HALF_LIFE_HOURS)
    }
}

impl RankingPolicy for TrendingRanking {
    fn name(&self) -> &'static str {
        "trending"
    }

    fn score(&self, event: &Event, now: DateTime<Utc>) -> f64 {
        let volume = event.volume_24h.to_f64().unwrap_or(0.0);
        let age_hours = (now - event.created_at).num_seconds().max(0) as f64 / 3600.0;
        volume * 0.5_f64.powf(age_hours / self.half_life_hours)
    }
}

/// Newest first.
#[derive(Debug, Clone, Copy, Default)]
pub struct NewestRanking;

impl RankingPolicy for NewestRanking {
    fn name(&self) -> &'static str {
        "new"
    }

    fn score(&self, event: &Event, _now: DateTime<Utc>) -> f64 {
        event.created_at.timestamp_millis() as f64
    }
}

/// Highest total volume first.
#[derive(Debug, Clone, Copy, Default)]
pub struct VolumeRanking;

impl RankingPolicy for VolumeRanking {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn score(&self, event: &Event, _now: DateTime<Utc>) -> f64 {
        event.volume.to_f64().unwrap_or(0.0)
    }
}

/// Policy selection per listing tag.
#[derive(Clone)]
pub struct RankingPolicies {
    trending: Arc<dyn RankingPolicy>,
    newest: Arc<dyn RankingPolicy>,
    by_volume: Arc<dyn RankingPolicy>,
}

impl RankingPolicies {
    #[must_use]
    pub fn new(
        trending: Arc<dyn RankingPolicy>,
        newest: Arc<dyn RankingPolicy>,
        by_volume: Arc<dyn RankingPolicy>,
    ) -> Self {
        Self {
            trending,
            newest,
            by_volume,
        }
    }

    #[must_use]
    pub fn with_half_life(half_life_hours: f64) -> Self {
        Self::new(
            Arc::new(TrendingRanking::new(half_life_hours)),
            Arc::new(NewestRanking),
            Arc::new(VolumeRanking),
        )
    }

    #[must_use]
    pub fn for_tag(&self, tag: &ListingTag) -> &dyn RankingPolicy {
        match tag {
            ListingTag::Trending => self.trending.as_ref(),
            ListingTag::New => self.newest.as_ref(),
            ListingTag::Sports | ListingTag::Category(_) => self.by_volume.as_ref(),
        }
    }

    #[must_use]
    pub fn by_volume(&self) -> &dyn RankingPolicy {
        self.by_volume.as_ref()
    }
}

impl Default for RankingPolicies {
    fn default() -> Self {
        Self::with_half_life(DEFAULT_TRENDING_HALF_LIFE_HOURS)
    }
}

type Scored = (f64, Event);

fn score_all(events: Vec<Event>, policy: &dyn RankingPolicy, now: DateTime<Utc>) -> Vec<Scored> {
    events
        .into_iter()
        .map(|event| (policy.score(&event, now), event))
        .collect()
}

fn by_rank((score_a, a): &Scored, (score_b, b): &Scored) -> Ordering {
    score_b.total_cmp(score_a).then_with(|| a.id.cmp(&b.id))
}

/// Order `events` by descending score; equal scores fall back to id order.
pub fn rank(events: Vec<Event>, policy: &dyn RankingPolicy, now: DateTime<Utc>) -> Vec<Event> {
    let mut scored = score_all(events, policy, now);
    scored.sort_by(by_rank);
    scored.into_iter().map(|(_, event)| event).collect()
}

/// The `limit` events starting at `offset` in [`rank`] order.
///
/// Only the first `offset + limit` events are sorted.
pub fn rank_page(
    events: Vec<Event>,
    policy: &dyn RankingPolicy,
    now: DateTime<Utc>,
    offset: usize,
    limit: usize,
) -> Vec<Event> {
    if limit == 0 || offset >= events.len() {
        return Vec::new();
    }

    let end = offset.saturating_add(limit);
    let mut scored = score_all(events, policy, now);
    if end < scored.len() {
        scored.select_nth_unstable_by(end, by_rank);
        scored.truncate(end);
    }
    scored.sort_by(by_rank);

    scored
        .into_iter()
        .skip(offset)
        .map(|(_, event)| event)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::event::EventStatus;
    use crate::domain::id::EventId;
    use chrono::Duration;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn event(id: &str, volume: Decimal, volume_24h: Decimal, age_hours: i64) -> Event {
        let now = Utc::now();
        Event {
            id: EventId::new(id),
            slug: id.to_string(),
            title: id.to_string(),
            status: EventStatus::Active,
            icon_url: None,
            recurrence: None,
            is_bookmarked: false,
            is_hidden: false,
            sports: None,
            volume,
            volume_24h,
            tags: Vec::new(),
            markets: Vec::new(),
            created_at: now - Duration::hours(age_hours),
        }
    }

    fn ids(events: &[Event]) -> Vec<&str> {
        events.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn trending_prefers_recent_volume() {
        let events = vec![
            event("old", dec!(0), dec!(1000), 24 * 14),
            event("fresh", dec!(0), dec!(500), 1),
        ];
        let ranked = rank(events, &TrendingRanking::default(), Utc::now());
        assert_eq!(ids(&ranked), vec!["fresh", "old"]);
    }

    #[test]
    fn newest_orders_by_creation() {
        let events = vec![
            event("a", dec!(0), dec!(0), 10),
            event("b", dec!(0), dec!(0), 1),
            event("c", dec!(0), dec!(0), 5),
        ];
        let ranked = rank(events, &NewestRanking, Utc::now());
        assert_eq!(ids(&ranked), vec!["b", "c", "a"]);
    }

    #[test]
    fn ties_break_by_id() {
        let events = vec![
            event("c", dec!(5), dec!(0), 1),
            event("a", dec!(5), dec!(0), 1),
            event("b", dec!(5), dec!(0), 1),
        ];
        let ranked = rank(events, &VolumeRanking, Utc::now());
        assert_eq!(ids(&ranked), vec!["a", "b", "c"]);
    }

    #[test]
    fn page_matches_full_ranking_window() {
        let events = || {
            (0..30)
                .map(|i| event(&format!("e{i:02}"), Decimal::from(i % 7), dec!(0), 1))
                .collect::<Vec<_>>()
        };
        let now = Utc::now();
        let full = rank(events(), &VolumeRanking, now);

        for (offset, limit) in [(0, 5), (5, 5), (26, 10), (0, 30), (0, 100)] {
            let page = rank_page(events(), &VolumeRanking, now, offset, limit);
            let expected: Vec<&str> = ids(&full).into_iter().skip(offset).take(limit).collect();
            assert_eq!(ids(&page), expected, "offset {offset} limit {limit}");
        }
        assert!(rank_page(events(), &VolumeRanking, now, 30, 5).is_empty());
        assert!(rank_page(events(), &VolumeRanking, now, 0, 0).is_empty());
    }

    #[test]
    fn policy_per_tag() {
        let policies = RankingPolicies::default();
        assert_eq!(policies.for_tag(&ListingTag::Trending).name(), "trending");
        assert_eq!(policies.for_tag(&ListingTag::New).name(), "new");
        assert_eq!(policies.for_tag(&ListingTag::Sports).name(), "volume");
        assert_eq!(
            policies
                .for_tag(&ListingTag::Category("politics".into()))
                .name(),
            "volume"
        );
    }
}
