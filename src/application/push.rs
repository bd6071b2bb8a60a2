//! Push notification click routing.

use url::Url;

use crate::domain::notification::{resolve_target, NotificationContent};
use crate::error::Result;
use crate::port::outbound::window::WindowHost;

/// What a click ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A window already showing the target was focused.
    Focused { window_id: String },
    /// A same-origin window was navigated to the target and focused.
    Navigated { window_id: String },
    /// No reusable window existed.
    Opened,
}

/// Route a notification click.
///
/// Prefers a window already at the target, then any same-origin window,
/// and opens a new one only when neither exists.
pub async fn handle_notification_click(
    host: &dyn WindowHost,
    content: &NotificationContent,
    origin: &Url,
) -> Result<ClickOutcome> {
    let target = resolve_target(&content.url, origin);
    let windows = host.windows().await?;

    if let Some(window) = windows.iter().find(|w| w.url == target) {
        host.focus(&window.id).await?;
        return Ok(ClickOutcome::Focused {
            window_id: window.id.clone(),
        });
    }

    let same_origin = windows
        .iter()
        .filter(|w| w.url.origin() == target.origin())
        .max_by_key(|w| w.focused);
    if let Some(window) = same_origin {
        host.navigate(&window.id, &target).await?;
        host.focus(&window.id).await?;
        return Ok(ClickOutcome::Navigated {
            window_id: window.id.clone(),
        });
    }

    host.open(&target).await?;
    Ok(ClickOutcome::Opened)
}
