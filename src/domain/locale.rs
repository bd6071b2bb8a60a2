//! Supported locales and enabled-locale normalization.
//!
//! The supported set is static and ordered; every list of enabled locales
//! produced here follows that canonical order and always contains
//! [`DEFAULT_LOCALE`].

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// A locale the site can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    De,
    Es,
    Pt,
    Fr,
    Zh,
}

/// The locale every enabled list must contain.
pub const DEFAULT_LOCALE: Locale = Locale::En;

/// All supported locales in canonical order.
pub const SUPPORTED_LOCALES: [Locale; 6] = [
    Locale::En,
    Locale::De,
    Locale::Es,
    Locale::Pt,
    Locale::Fr,
    Locale::Zh,
];

impl Locale {
    /// Two-letter code used in URLs, settings and translation rows.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
            Self::Es => "es",
            Self::Pt => "pt",
            Self::Fr => "fr",
            Self::Zh => "zh",
        }
    }

    /// Parse a locale code, falling back to [`DEFAULT_LOCALE`].
    #[must_use]
    pub fn parse_or_default(code: &str) -> Self {
        code.parse().unwrap_or(DEFAULT_LOCALE)
    }

    #[must_use]
    pub fn is_default(self) -> bool {
        self == DEFAULT_LOCALE
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        SUPPORTED_LOCALES
            .iter()
            .copied()
            .find(|locale| locale.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| DomainError::UnsupportedLocale {
                code: code.to_string(),
            })
    }
}

/// Filter `codes` to supported locales in canonical order.
///
/// Unknown codes and duplicates are dropped. The default locale is
/// prepended when missing.
#[must_use]
pub fn normalize_enabled_locales<S: AsRef<str>>(codes: &[S]) -> Vec<Locale> {
    let requested: Vec<Locale> = codes
        .iter()
        .filter_map(|code| code.as_ref().parse().ok())
        .collect();

    let mut enabled: Vec<Locale> = SUPPORTED_LOCALES
        .iter()
        .copied()
        .filter(|locale| requested.contains(locale))
        .collect();

    if !enabled.contains(&DEFAULT_LOCALE) {
        enabled.insert(0, DEFAULT_LOCALE);
    }
    enabled
}

/// Parse the JSON-encoded enabled-locale list stored in settings.
///
/// Absent, malformed, or non-array values yield the full supported set.
#[must_use]
pub fn parse_enabled_locales(raw: Option<&str>) -> Vec<Locale> {
    let Some(raw) = raw.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return SUPPORTED_LOCALES.to_vec();
    };

    match serde_json::from_str::<Vec<serde_json::Value>>(raw) {
        Ok(values) => {
            let codes: Vec<&str> = values.iter().filter_map(|v| v.as_str()).collect();
            normalize_enabled_locales(&codes)
        }
        Err(_) => SUPPORTED_LOCALES.to_vec(),
    }
}
