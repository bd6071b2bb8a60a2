//! Settings persistence port.

use async_trait::async_trait;

use crate::domain::settings::{SettingsEntry, SettingsSnapshot};
use crate::error::Result;

#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Every stored setting.
    async fn load(&self) -> Result<SettingsSnapshot>;

    /// Insert or replace entries atomically.
    async fn upsert(&self, entries: Vec<SettingsEntry>) -> Result<()>;
}
