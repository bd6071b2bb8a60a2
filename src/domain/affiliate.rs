//! Affiliate referral codes and the redirect cookie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;

pub const AFFILIATE_COOKIE_NAME: &str = "platform_affiliate";
pub const AFFILIATE_COOKIE_MAX_AGE_SECS: i64 = 30 * 24 * 60 * 60;

/// A referral code owned by a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Affiliate {
    pub code: String,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
}

/// JSON payload stored in the affiliate cookie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffiliateCookie {
    pub affiliate_code: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

impl AffiliateCookie {
    #[must_use]
    pub fn new(affiliate_code: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            affiliate_code: affiliate_code.into(),
            timestamp: at.timestamp_millis(),
        }
    }
}

/// Return `to` when it is a same-origin path, otherwise `/`.
///
/// Accepted targets start with a single `/`. Protocol-relative (`//host`)
/// and backslash (`/\host`) forms are rejected since browsers resolve them
/// to another origin.
#[must_use]
pub fn safe_redirect_target(to: Option<&str>) -> &str {
    match to {
        Some(path)
            if path.starts_with('/')
                && !path.starts_with("//")
                && !path.starts_with("/\\")
                && !path.chars().any(char::is_control) =>
        {
            path
        }
        _ => "/",
    }
}
