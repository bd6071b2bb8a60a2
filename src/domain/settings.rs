//! Persisted key/value settings and their typed view.
//!
//! Settings are stored as strings under a `(group, key)` pair. Booleans use a
//! fixed token vocabulary; see [`parse_bool_setting`].

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::error::DomainError;
use super::locale::{parse_enabled_locales, Locale};

pub const GROUP_I18N: &str = "i18n";
pub const GROUP_EVENTS: &str = "events";
pub const GROUP_THEME: &str = "theme";

pub const KEY_ENABLED_LOCALES: &str = "enabled_locales";
pub const KEY_AUTOMATIC_TRANSLATIONS: &str = "automatic_translations_enabled";
pub const KEY_AUTO_DEPLOY_NEW_EVENTS: &str = "auto_deploy_new_events";
pub const KEY_THEME_PRESET: &str = "preset";
pub const KEY_THEME_RADIUS: &str = "radius";

const TRUTHY: [&str; 5] = ["true", "1", "yes", "on", "enabled"];
const FALSY: [&str; 5] = ["false", "0", "no", "off", "disabled"];

/// A single persisted setting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsEntry {
    pub group: String,
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

impl SettingsEntry {
    pub fn new(group: impl Into<String>, key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            key: key.into(),
            value: value.into(),
            updated_at: Utc::now(),
        }
    }
}

/// All settings rows at one point in time, indexed by `(group, key)`.
#[derive(Debug, Clone, Default)]
pub struct SettingsSnapshot {
    entries: HashMap<(String, String), SettingsEntry>,
}

impl SettingsSnapshot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, entry: SettingsEntry) {
        self.entries
            .insert((entry.group.clone(), entry.key.clone()), entry);
    }

    /// Builder-style insert used by fixtures.
    #[must_use]
    pub fn with(mut self, group: &str, key: &str, value: &str) -> Self {
        self.insert(SettingsEntry::new(group, key, value));
        self
    }

    #[must_use]
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.entries
            .get(&(group.to_string(), key.to_string()))
            .map(|entry| entry.value.as_str())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<SettingsEntry> for SettingsSnapshot {
    fn from_iter<I: IntoIterator<Item = SettingsEntry>>(iter: I) -> Self {
        let mut snapshot = Self::new();
        for entry in iter {
            snapshot.insert(entry);
        }
        snapshot
    }
}

/// Interpret a stored boolean token.
///
/// A recognized truthy or falsy token (case-insensitive, trimmed) wins;
/// a missing or unrecognized value returns `default`.
#[must_use]
pub fn parse_bool_setting(value: Option<&str>, default: bool) -> bool {
    let Some(value) = value else {
        return default;
    };
    let token = value.trim().to_ascii_lowercase();
    if TRUTHY.contains(&token.as_str()) {
        true
    } else if FALSY.contains(&token.as_str()) {
        false
    } else {
        default
    }
}

/// Encode a boolean the way settings rows store it.
#[must_use]
pub const fn encode_bool_setting(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

#[must_use]
pub fn get_enabled_locales_from_settings(snapshot: &SettingsSnapshot) -> Vec<Locale> {
    parse_enabled_locales(snapshot.get(GROUP_I18N, KEY_ENABLED_LOCALES))
}

/// Whether newly synced events are published automatically. Defaults to on.
#[must_use]
pub fn get_auto_deploy_new_events_enabled_from_settings(
    snapshot: Option<&SettingsSnapshot>,
) -> bool {
    parse_bool_setting(
        snapshot.and_then(|s| s.get(GROUP_EVENTS, KEY_AUTO_DEPLOY_NEW_EVENTS)),
        true,
    )
}

/// Whether event titles are machine-translated. Defaults to off.
#[must_use]
pub fn get_automatic_translations_enabled_from_settings(
    snapshot: Option<&SettingsSnapshot>,
) -> bool {
    parse_bool_setting(
        snapshot.and_then(|s| s.get(GROUP_I18N, KEY_AUTOMATIC_TRANSLATIONS)),
        false,
    )
}

/// Theme values editable from the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeSettings {
    pub preset: String,
    pub radius: Option<String>,
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            preset: "default".to_string(),
            radius: None,
        }
    }
}

impl ThemeSettings {
    const MAX_PRESET_LEN: usize = 64;
    const MAX_RADIUS_LEN: usize = 16;

    /// Build validated theme settings.
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidSetting`] when the preset is blank or
    /// too long, or the radius is not a short CSS length.
    pub fn try_new(preset: &str, radius: Option<&str>) -> Result<Self, DomainError> {
        let preset = preset.trim();
        if preset.is_empty() || preset.len() > Self::MAX_PRESET_LEN {
            return Err(DomainError::InvalidSetting {
                key: KEY_THEME_PRESET,
                reason: "preset must be 1-64 characters".into(),
            });
        }
        if !preset
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(DomainError::InvalidSetting {
                key: KEY_THEME_PRESET,
                reason: "preset may only contain letters, digits, '-' and '_'".into(),
            });
        }

        let radius = radius.map(str::trim).filter(|r| !r.is_empty());
        if let Some(radius) = radius {
            if !is_css_length(radius) || radius.len() > Self::MAX_RADIUS_LEN {
                return Err(DomainError::InvalidSetting {
                    key: KEY_THEME_RADIUS,
                    reason: format!("'{radius}' is not a CSS length"),
                });
            }
        }

        Ok(Self {
            preset: preset.to_string(),
            radius: radius.map(str::to_string),
        })
    }
}

fn is_css_length(value: &str) -> bool {
    let unit_start = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(unit_start);
    !number.is_empty()
        && number.parse::<f64>().is_ok()
        && matches!(unit, "" | "px" | "rem" | "em" | "%")
}

/// Strongly typed view over a [`SettingsSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSettings {
    pub enabled_locales: Vec<Locale>,
    pub automatic_translations: bool,
    pub auto_deploy_new_events: bool,
    pub theme: ThemeSettings,
}

impl SiteSettings {
    /// Parse the known slots. Unknown or invalid values fall back to defaults.
    #[must_use]
    pub fn from_snapshot(snapshot: &SettingsSnapshot) -> Self {
        let theme = snapshot
            .get(GROUP_THEME, KEY_THEME_PRESET)
            .and_then(|preset| {
                ThemeSettings::try_new(preset, snapshot.get(GROUP_THEME, KEY_THEME_RADIUS)).ok()
            })
            .unwrap_or_default();

        Self {
            enabled_locales: get_enabled_locales_from_settings(snapshot),
            automatic_translations: get_automatic_translations_enabled_from_settings(Some(
                snapshot,
            )),
            auto_deploy_new_events: get_auto_deploy_new_events_enabled_from_settings(Some(
                snapshot,
            )),
            theme,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::locale::SUPPORTED_LOCALES;

    fn auto_deploy(value: &str) -> SettingsSnapshot {
        SettingsSnapshot::new().with(GROUP_EVENTS, KEY_AUTO_DEPLOY_NEW_EVENTS, value)
    }

    #[test]
    fn auto_deploy_defaults_to_true_without_snapshot() {
        assert!(get_auto_deploy_new_events_enabled_from_settings(None));
    }

    #[test]
    fn auto_deploy_honors_explicit_false() {
        let snapshot = auto_deploy("false");
        assert!(!get_auto_deploy_new_events_enabled_from_settings(Some(&snapshot)));
    }

    #[test]
    fn auto_deploy_invalid_token_falls_back() {
        let snapshot = auto_deploy("invalid");
        assert!(get_auto_deploy_new_events_enabled_from_settings(Some(&snapshot)));
    }

    #[test]
    fn bool_tokens_are_case_insensitive() {
        assert!(parse_bool_setting(Some(" Enabled "), false));
        assert!(!parse_bool_setting(Some("OFF"), true));
        assert!(!parse_bool_setting(Some("0"), true));
        assert!(parse_bool_setting(Some("yes"), false));
    }

    #[test]
    fn bool_missing_returns_default() {
        assert!(parse_bool_setting(None, true));
        assert!(!parse_bool_setting(None, false));
    }

    #[test]
    fn automatic_translations_default_off() {
        assert!(!get_automatic_translations_enabled_from_settings(None));
        let snapshot =
            SettingsSnapshot::new().with(GROUP_I18N, KEY_AUTOMATIC_TRANSLATIONS, "on");
        assert!(get_automatic_translations_enabled_from_settings(Some(&snapshot)));
    }

    #[test]
    fn site_settings_from_empty_snapshot() {
        let settings = SiteSettings::from_snapshot(&SettingsSnapshot::new());
        assert_eq!(settings.enabled_locales, SUPPORTED_LOCALES.to_vec());
        assert!(settings.auto_deploy_new_events);
        assert!(!settings.automatic_translations);
        assert_eq!(settings.theme, ThemeSettings::default());
    }

    #[test]
    fn site_settings_reads_theme() {
        let snapshot = SettingsSnapshot::new()
            .with(GROUP_THEME, KEY_THEME_PRESET, "midnight")
            .with(GROUP_THEME, KEY_THEME_RADIUS, "0.5rem");
        let settings = SiteSettings::from_snapshot(&snapshot);
        assert_eq!(settings.theme.preset, "midnight");
        assert_eq!(settings.theme.radius.as_deref(), Some("0.5rem"));
    }

    #[test]
    fn theme_rejects_bad_values() {
        assert!(ThemeSettings::try_new("", None).is_err());
        assert!(ThemeSettings::try_new("a b", None).is_err());
        assert!(ThemeSettings::try_new("amber", Some("1 ; color: red")).is_err());
        assert!(ThemeSettings::try_new("amber", Some("12px")).is_ok());
        assert!(ThemeSettings::try_new("amber", Some("  ")).unwrap().radius.is_none());
    }
}
