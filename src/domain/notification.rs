//! Push notification payloads.
//!
//! Payloads arrive either as JSON with optional display fields or as plain
//! text; missing fields take the site defaults.

use serde::Deserialize;
use url::Url;

pub const DEFAULT_TITLE: &str = "New notification";
pub const DEFAULT_ICON: &str = "/icon-192x192.png";
pub const DEFAULT_BADGE: &str = "/badge-72x72.png";
pub const DEFAULT_URL: &str = "/";

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    title: Option<String>,
    body: Option<String>,
    icon: Option<String>,
    badge: Option<String>,
    url: Option<String>,
}

/// What the system notification displays, and where a click leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
    pub icon: String,
    pub badge: String,
    pub url: String,
}

impl Default for NotificationContent {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: String::new(),
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            url: DEFAULT_URL.to_string(),
        }
    }
}

impl NotificationContent {
    /// Decode a push message body.
    ///
    /// JSON objects supply any of `title`, `body`, `icon`, `badge`, `url`.
    /// Anything else is treated as plain text and shown as the body.
    #[must_use]
    pub fn from_push_data(data: &[u8]) -> Self {
        let defaults = Self::default();
        if data.is_empty() {
            return defaults;
        }

        match serde_json::from_slice::<RawPayload>(data) {
            Ok(raw) => Self {
                title: non_blank(raw.title).unwrap_or(defaults.title),
                body: raw.body.unwrap_or_default(),
                icon: non_blank(raw.icon).unwrap_or(defaults.icon),
                badge: non_blank(raw.badge).unwrap_or(defaults.badge),
                url: non_blank(raw.url).unwrap_or(defaults.url),
            },
            Err(_) => Self {
                body: String::from_utf8_lossy(data).trim().to_string(),
                ..defaults
            },
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Resolve a notification's target against the site origin.
///
/// Relative targets join onto `origin`; absolute targets are kept. An
/// unparsable target falls back to the origin root.
#[must_use]
pub fn resolve_target(target: &str, origin: &Url) -> Url {
    origin
        .join(target)
        .unwrap_or_else(|_| origin.join(DEFAULT_URL).unwrap_or_else(|_| origin.clone()))
}
