//! Process-wide settings cache.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::cache_tag::CacheTag;
use crate::domain::locale::Locale;
use crate::domain::settings::{SettingsEntry, SettingsSnapshot, SiteSettings};
use crate::error::Result;
use crate::port::outbound::cache::CacheInvalidator;
use crate::port::outbound::settings::SettingsStore;

/// Loads the settings snapshot on first use and keeps it until a
/// `settings` tag invalidation drops it.
///
/// A load that started before a reset is returned to its caller but not
/// cached.
pub struct SettingsResolver {
    store: Arc<dyn SettingsStore>,
    cached: RwLock<Option<Arc<SettingsSnapshot>>>,
    // Bumped under the `cached` write lock.
    generation: AtomicU64,
}

impl SettingsResolver {
    #[must_use]
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self {
            store,
            cached: RwLock::new(None),
            generation: AtomicU64::new(0),
        }
    }

    /// The current snapshot, loading it if nothing is cached.
    pub async fn snapshot(&self) -> Result<Arc<SettingsSnapshot>> {
        let cached = self.cached.read().clone();
        if let Some(snapshot) = cached {
            return Ok(snapshot);
        }

        let generation = self.generation.load(Ordering::Acquire);
        let snapshot = Arc::new(self.store.load().await?);

        let mut cached = self.cached.write();
        if self.generation.load(Ordering::Acquire) == generation {
            debug!(entries = snapshot.len(), "Loaded settings snapshot");
            *cached = Some(Arc::clone(&snapshot));
        } else {
            debug!("Settings changed during load, not caching snapshot");
        }
        Ok(snapshot)
    }

    /// Typed settings. Falls back to defaults when storage is unavailable.
    pub async fn site_settings(&self) -> SiteSettings {
        match self.snapshot().await {
            Ok(snapshot) => SiteSettings::from_snapshot(&snapshot),
            Err(e) => {
                warn!(error = %e, "Failed to load settings, using defaults");
                SiteSettings::from_snapshot(&SettingsSnapshot::new())
            }
        }
    }

    pub async fn enabled_locales(&self) -> Vec<Locale> {
        self.site_settings().await.enabled_locales
    }

    pub async fn auto_deploy_new_events_enabled(&self) -> bool {
        self.site_settings().await.auto_deploy_new_events
    }

    pub async fn automatic_translations_enabled(&self) -> bool {
        self.site_settings().await.automatic_translations
    }

    /// Persist entries. The caller records the matching mutation.
    pub async fn write(&self, entries: Vec<SettingsEntry>) -> Result<()> {
        self.store.upsert(entries).await
    }

    /// Drop the cached snapshot. Returns true if one was cached.
    pub fn reset(&self) -> bool {
        let mut cached = self.cached.write();
        self.generation.fetch_add(1, Ordering::AcqRel);
        cached.take().is_some()
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.cached.read().is_some()
    }
}

impl CacheInvalidator for SettingsResolver {
    fn invalidate(&self, tag: &CacheTag) -> usize {
        match tag {
            CacheTag::Settings => usize::from(self.reset()),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::settings::{
        GROUP_EVENTS, GROUP_I18N, KEY_AUTO_DEPLOY_NEW_EVENTS, KEY_ENABLED_LOCALES,
    };
    use crate::error::Error;
    use async_trait::async_trait;
    use std::sync::atomic::AtomicUsize;
    use tokio::sync::Notify;

    struct CountingStore {
        snapshot: SettingsSnapshot,
        loads: AtomicUsize,
        fail: bool,
    }

    impl CountingStore {
        fn new(snapshot: SettingsSnapshot) -> Self {
            Self {
                snapshot,
                loads: AtomicUsize::new(0),
                fail: false,
            }
        }
    }

    #[async_trait]
    impl SettingsStore for CountingStore {
        async fn load(&self) -> Result<SettingsSnapshot> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(Error::Database("unavailable".into()));
            }
            Ok(self.snapshot.clone())
        }

        async fn upsert(&self, _entries: Vec<SettingsEntry>) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn snapshot_is_loaded_once_until_reset() {
        let store = Arc::new(CountingStore::new(
            SettingsSnapshot::new().with(GROUP_EVENTS, KEY_AUTO_DEPLOY_NEW_EVENTS, "off"),
        ));
        let resolver = SettingsResolver::new(store.clone());

        assert!(!resolver.auto_deploy_new_events_enabled().await);
        assert!(!resolver.auto_deploy_new_events_enabled().await);
        assert_eq!(store.loads.load(Ordering::SeqCst), 1);

        assert_eq!(resolver.invalidate(&CacheTag::Settings), 1);
        assert_eq!(resolver.invalidate(&CacheTag::EventsAll), 0);
        let _ = resolver.snapshot().await.unwrap();
        assert_eq!(store.loads.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn enabled_locales_come_from_snapshot() {
        let store = Arc::new(CountingStore::new(SettingsSnapshot::new().with(
            GROUP_I18N,
            KEY_ENABLED_LOCALES,
            r#"["de","fr"]"#,
        )));
        let resolver = SettingsResolver::new(store);
        assert_eq!(
            resolver.enabled_locales().await,
            vec![Locale::En, Locale::De, Locale::Fr]
        );
    }

    #[tokio::test]
    async fn storage_failure_falls_back_to_defaults() {
        let mut store = CountingStore::new(SettingsSnapshot::new());
        store.fail = true;
        let resolver = SettingsResolver::new(Arc::new(store));

        assert!(resolver.auto_deploy_new_events_enabled().await);
        assert!(!resolver.automatic_translations_enabled().await);
        assert!(!resolver.is_loaded());
    }

    /// Serves whatever the table holds at load time, and parks inside
    /// `load` until released.
    struct GatedStore {
        snapshot: parking_lot::Mutex<SettingsSnapshot>,
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl SettingsStore for GatedStore {
        async fn load(&self) -> Result<SettingsSnapshot> {
            let snapshot = self.snapshot.lock().clone();
            self.entered.notify_one();
            self.release.notified().await;
            Ok(snapshot)
        }

        async fn upsert(&self, entries: Vec<SettingsEntry>) -> Result<()> {
            let mut snapshot = self.snapshot.lock();
            for entry in entries {
                snapshot.insert(entry);
            }
            Ok(())
        }
    }

    #[tokio::test]
    async fn load_overlapping_a_reset_is_not_cached() {
        let store = Arc::new(GatedStore {
            snapshot: parking_lot::Mutex::new(SettingsSnapshot::new().with(
                GROUP_EVENTS,
                KEY_AUTO_DEPLOY_NEW_EVENTS,
                "true",
            )),
            entered: Notify::new(),
            release: Notify::new(),
        });
        let resolver = Arc::new(SettingsResolver::new(store.clone()));

        let reader = tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move { resolver.auto_deploy_new_events_enabled().await }
        });
        store.entered.notified().await;

        resolver
            .write(vec![SettingsEntry::new(
                GROUP_EVENTS,
                KEY_AUTO_DEPLOY_NEW_EVENTS,
                "false",
            )])
            .await
            .unwrap();
        resolver.invalidate(&CacheTag::Settings);
        store.release.notify_one();

        // The in-flight reader still sees what it loaded.
        assert!(reader.await.unwrap());
        assert!(!resolver.is_loaded());

        let next = tokio::spawn({
            let resolver = Arc::clone(&resolver);
            async move { resolver.auto_deploy_new_events_enabled().await }
        });
        store.entered.notified().await;
        store.release.notify_one();
        assert!(!next.await.unwrap());
        assert!(resolver.is_loaded());
    }
}
