//! Query-string interpretation for the listing endpoints.

use std::collections::HashMap;

use tracing::debug;

use crate::domain::criteria::{Frequency, ListCriteria};
use crate::domain::event::{EventStatus, SportsSection};
use crate::domain::locale::{Locale, DEFAULT_LOCALE};
use crate::domain::tag::ListingTag;
use crate::domain::viewer::Viewer;

pub const INVALID_STATUS: &str = "Invalid status filter.";

/// Largest accepted listing offset.
pub const MAX_OFFSET: usize = 10_000;

pub type Params = HashMap<String, String>;

fn param<'a>(params: &'a Params, name: &str) -> Option<&'a str> {
    params.get(name).map(String::as_str)
}

fn flag(params: &Params, name: &str) -> bool {
    param(params, name) == Some("true")
}

/// Non-numeric or negative offsets become zero; large ones are clamped.
#[must_use]
pub fn parse_offset(raw: Option<&str>) -> usize {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .map_or(0, |n| usize::try_from(n.max(0)).unwrap_or(0).min(MAX_OFFSET))
}

/// Requested locale if it is supported and enabled, else the default.
#[must_use]
pub fn pick_locale(raw: Option<&str>, enabled: &[Locale]) -> Locale {
    let locale = raw.map_or(DEFAULT_LOCALE, Locale::parse_or_default);
    if enabled.contains(&locale) {
        locale
    } else {
        DEFAULT_LOCALE
    }
}

/// Build listing criteria for `GET /api/events`.
///
/// Only an unknown `status` is rejected. Other unrecognized values fall
/// back to their defaults.
pub fn parse_list_criteria(
    params: &Params,
    viewer: &Viewer,
    locale: Locale,
) -> Result<ListCriteria, &'static str> {
    let status = match param(params, "status").map(str::trim) {
        None | Some("") => EventStatus::Active,
        Some(raw) => raw.parse().map_err(|_| INVALID_STATUS)?,
    };

    let frequency = match param(params, "frequency") {
        None => Frequency::All,
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            debug!(error = %e, "Ignoring frequency filter");
            Frequency::All
        }),
    };

    let sports_section = param(params, "sportsSection")
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| raw.parse::<SportsSection>().ok());

    let sports_sport_slug = param(params, "sportsSportSlug")
        .map(str::trim)
        .filter(|slug| !slug.is_empty())
        .map(str::to_string);

    Ok(ListCriteria {
        tag: ListingTag::from_slug(param(params, "tag").unwrap_or_default()),
        search: param(params, "search").unwrap_or_default().to_string(),
        user_id: viewer.user_id.clone(),
        bookmarked: flag(params, "bookmarked"),
        status,
        locale,
        offset: parse_offset(param(params, "offset")),
        sports_sport_slug,
        sports_section,
        frequency,
        hide_sports: flag(params, "hideSports"),
        hide_crypto: flag(params, "hideCrypto"),
        hide_earnings: flag(params, "hideEarnings"),
        include_hidden: viewer.is_admin && flag(params, "includeHidden"),
    })
}

/// `limit` as sent; the market service clamps it.
#[must_use]
pub fn parse_limit(raw: Option<&str>) -> Option<i64> {
    raw.and_then(|v| v.trim().parse().ok())
}
