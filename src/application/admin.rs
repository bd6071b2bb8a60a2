//! Admin mutations.
//!
//! Every action checks the viewer first, writes, then records the mutation
//! so dependent caches are dropped. Results are reported as
//! [`ActionResult`] rather than `Err` so callers can render them directly.

use std::sync::Arc;

use serde::Serialize;
use tracing::{error, info, warn};

use super::cache::invalidation::InvalidationRegistry;
use super::settings::SettingsResolver;
use crate::domain::cache_tag::Mutation;
use crate::domain::id::EventId;
use crate::domain::locale::normalize_enabled_locales;
use crate::domain::settings::{
    encode_bool_setting, SettingsEntry, ThemeSettings, GROUP_EVENTS, GROUP_I18N, GROUP_THEME,
    KEY_AUTO_DEPLOY_NEW_EVENTS, KEY_ENABLED_LOCALES, KEY_THEME_PRESET, KEY_THEME_RADIUS,
};
use crate::domain::viewer::Viewer;
use crate::error::Error;
use crate::port::outbound::event::EventStore;

pub const UNAUTHORIZED: &str = "Unauthorized.";
pub const EVENT_NOT_FOUND: &str = "Event not found.";
pub const CATEGORY_NOT_FOUND: &str = "Category not found.";
pub const UPDATE_FAILED: &str = "Failed to save changes.";

/// Outcome of an admin action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ActionResult {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            success: true,
            error: None,
        }
    }

    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(message.into()),
        }
    }
}

pub struct AdminService {
    events: Arc<dyn EventStore>,
    settings: Arc<SettingsResolver>,
    invalidation: Arc<InvalidationRegistry>,
}

impl AdminService {
    #[must_use]
    pub fn new(
        events: Arc<dyn EventStore>,
        settings: Arc<SettingsResolver>,
        invalidation: Arc<InvalidationRegistry>,
    ) -> Self {
        Self {
            events,
            settings,
            invalidation,
        }
    }

    pub async fn toggle_event_visibility(
        &self,
        viewer: &Viewer,
        event_id: &EventId,
        hidden: bool,
    ) -> ActionResult {
        if let Some(denied) = deny_unless_admin(viewer, "toggle_event_visibility") {
            return denied;
        }

        match self.events.set_hidden(event_id, hidden).await {
            Ok(Some(slug)) => {
                info!(event_id = %event_id, slug = %slug, hidden, "Event visibility changed");
                self.invalidation
                    .record(&Mutation::EventVisibilityChanged { slug });
                ActionResult::ok()
            }
            Ok(None) => ActionResult::failed(EVENT_NOT_FOUND),
            Err(e) => storage_failure("toggle_event_visibility", &e),
        }
    }

    pub async fn update_auto_deploy_new_events(
        &self,
        viewer: &Viewer,
        enabled: bool,
    ) -> ActionResult {
        if let Some(denied) = deny_unless_admin(viewer, "update_auto_deploy_new_events") {
            return denied;
        }

        let entry = SettingsEntry::new(
            GROUP_EVENTS,
            KEY_AUTO_DEPLOY_NEW_EVENTS,
            encode_bool_setting(enabled),
        );
        match self.settings.write(vec![entry]).await {
            Ok(()) => {
                self.invalidation.record(&Mutation::AutoDeploySettingChanged);
                ActionResult::ok()
            }
            Err(e) => storage_failure("update_auto_deploy_new_events", &e),
        }
    }

    pub async fn update_theme_settings(
        &self,
        viewer: &Viewer,
        preset: &str,
        radius: Option<&str>,
    ) -> ActionResult {
        if let Some(denied) = deny_unless_admin(viewer, "update_theme_settings") {
            return denied;
        }

        let theme = match ThemeSettings::try_new(preset, radius) {
            Ok(theme) => theme,
            Err(e) => return ActionResult::failed(e.to_string()),
        };

        let entries = vec![
            SettingsEntry::new(GROUP_THEME, KEY_THEME_PRESET, theme.preset),
            SettingsEntry::new(
                GROUP_THEME,
                KEY_THEME_RADIUS,
                theme.radius.unwrap_or_default(),
            ),
        ];
        match self.settings.write(entries).await {
            Ok(()) => {
                self.invalidation.record(&Mutation::ThemeSettingsChanged);
                ActionResult::ok()
            }
            Err(e) => storage_failure("update_theme_settings", &e),
        }
    }

    /// Store the enabled locale set. Unknown codes are dropped and the
    /// default locale is always kept.
    pub async fn update_enabled_locales<S: AsRef<str> + Sync>(
        &self,
        viewer: &Viewer,
        codes: &[S],
    ) -> ActionResult {
        if let Some(denied) = deny_unless_admin(viewer, "update_enabled_locales") {
            return denied;
        }

        let locales: Vec<&str> = normalize_enabled_locales(codes)
            .into_iter()
            .map(|locale| locale.code())
            .collect();
        let encoded = match serde_json::to_string(&locales) {
            Ok(encoded) => encoded,
            Err(e) => return storage_failure("update_enabled_locales", &Error::from(e)),
        };

        let entry = SettingsEntry::new(GROUP_I18N, KEY_ENABLED_LOCALES, encoded);
        match self.settings.write(vec![entry]).await {
            Ok(()) => {
                self.invalidation.record(&Mutation::EnabledLocalesChanged);
                ActionResult::ok()
            }
            Err(e) => storage_failure("update_enabled_locales", &e),
        }
    }

    pub async fn update_category(
        &self,
        viewer: &Viewer,
        slug: &str,
        is_main_category: bool,
        is_hidden: bool,
    ) -> ActionResult {
        if let Some(denied) = deny_unless_admin(viewer, "update_category") {
            return denied;
        }

        match self
            .events
            .update_category(slug, is_main_category, is_hidden)
            .await
        {
            Ok(true) => {
                info!(slug, is_main_category, is_hidden, "Category updated");
                self.invalidation.record(&Mutation::CategoryChanged);
                ActionResult::ok()
            }
            Ok(false) => ActionResult::failed(CATEGORY_NOT_FOUND),
            Err(e) => storage_failure("update_category", &e),
        }
    }
}

fn deny_unless_admin(viewer: &Viewer, action: &'static str) -> Option<ActionResult> {
    if viewer.is_admin {
        return None;
    }
    warn!(
        action,
        user = viewer.user_id.as_ref().map(|u| u.as_str()).unwrap_or("anonymous"),
        "Rejected admin action"
    );
    Some(ActionResult::failed(UNAUTHORIZED))
}

fn storage_failure(action: &'static str, e: &Error) -> ActionResult {
    error!(action, error = %e, "Admin action failed");
    ActionResult::failed(UPDATE_FAILED)
}
