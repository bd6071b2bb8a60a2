//! Debounced search input.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::trace;

use super::store::{FilterPatch, FilterStore};

/// Quiet period after the last keystroke before the search is committed.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(150);

/// Local search text that commits to the shared store after a quiet period.
///
/// Nothing is committed until the user has typed at least once. Changes
/// coming from the store side (navigation, a cleared filter) replace the
/// local text directly and cancel any pending commit.
pub struct SearchInput {
    store: Arc<FilterStore>,
    local: String,
    user_changed: bool,
    delay: Duration,
    pending: Option<JoinHandle<()>>,
}

impl SearchInput {
    #[must_use]
    pub fn new(store: Arc<FilterStore>) -> Self {
        Self::with_delay(store, SEARCH_DEBOUNCE)
    }

    #[must_use]
    pub fn with_delay(store: Arc<FilterStore>, delay: Duration) -> Self {
        let local = store.state().search;
        Self {
            store,
            local,
            user_changed: false,
            delay,
            pending: None,
        }
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.local
    }

    #[must_use]
    pub fn has_pending_commit(&self) -> bool {
        self.pending.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Record a keystroke and restart the debounce timer.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn on_input(&mut self, text: impl Into<String>) {
        self.local = text.into();
        self.user_changed = true;
        self.cancel_pending();

        let store = Arc::clone(&self.store);
        let value = self.local.clone();
        let delay = self.delay;
        self.pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if store.state().search != value {
                trace!(search = %value, "Committing search");
                store.update_filters(FilterPatch::search(value));
            }
        }));
    }

    /// Mirror a search value set elsewhere without committing it back.
    pub fn sync_external(&mut self, search: &str) {
        if self.local == search {
            return;
        }
        self.cancel_pending();
        self.local = search.to_string();
    }

    #[must_use]
    pub const fn user_changed(&self) -> bool {
        self.user_changed
    }

    fn cancel_pending(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
    }
}

impl Drop for SearchInput {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Arc<FilterStore>, SearchInput) {
        let store = Arc::new(FilterStore::default());
        let input = SearchInput::new(Arc::clone(&store));
        (store, input)
    }

    #[tokio::test(start_paused = true)]
    async fn commits_after_quiet_period() {
        let (store, mut input) = setup();

        input.on_input("b");
        tokio::time::sleep(Duration::from_millis(100)).await;
        input.on_input("bt");
        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(store.state().search, "");

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(store.state().search, "bt");
        assert_eq!(input.value(), "bt");
    }

    #[tokio::test(start_paused = true)]
    async fn external_change_does_not_commit() {
        let (store, mut input) = setup();
        let mut rx = store.subscribe();

        input.sync_external("election");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert_eq!(input.value(), "election");
        assert!(!input.user_changed());
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn external_change_cancels_pending_keystrokes() {
        let (store, mut input) = setup();

        input.on_input("stale");
        input.sync_external("fresh");
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;

        assert_eq!(store.state().search, "");
        assert_eq!(input.value(), "fresh");
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_input_cancels_commit() {
        let (store, mut input) = setup();
        input.on_input("btc");
        drop(input);
        tokio::time::sleep(SEARCH_DEBOUNCE * 2).await;
        assert_eq!(store.state().search, "");
    }
}
