//! One-shot application of a route's implied tag.

use super::store::FilterStore;

/// Applies a route's initial tag at most once per distinct value.
///
/// Re-applying the tag the guard last applied is a no-op, so a route that
/// re-runs its effect after every store update cannot loop.
#[derive(Debug, Default)]
pub struct InitialTagGuard {
    last_applied: Option<String>,
}

impl InitialTagGuard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `tag` as the main category unless it was the last one applied.
    /// Returns true when the store was updated.
    pub fn apply(&mut self, store: &FilterStore, tag: Option<&str>) -> bool {
        let Some(tag) = tag else {
            return false;
        };
        if self.last_applied.as_deref() == Some(tag) {
            return false;
        }
        store.select_main_category(tag);
        self.last_applied = Some(tag.to_string());
        true
    }

    #[must_use]
    pub fn last_applied(&self) -> Option<&str> {
        self.last_applied.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::filter::FilterPatch;

    #[test]
    fn applies_each_distinct_tag_once() {
        let store = FilterStore::default();
        let mut rx = store.subscribe();
        let mut guard = InitialTagGuard::new();

        assert!(guard.apply(&store, Some("politics")));
        assert!(rx.has_changed().unwrap());
        let _ = rx.borrow_and_update();

        assert!(!guard.apply(&store, Some("politics")));
        assert!(!rx.has_changed().unwrap());

        assert!(guard.apply(&store, Some("sports")));
        assert_eq!(store.state().main_tag, "sports");
    }

    #[test]
    fn user_changes_are_not_overwritten_by_reapplication() {
        let store = FilterStore::default();
        let mut guard = InitialTagGuard::new();
        guard.apply(&store, Some("politics"));

        store.update_filters(FilterPatch::tag("elections"));
        assert!(!guard.apply(&store, Some("politics")));
        assert_eq!(store.state().tag, "elections");
    }

    #[test]
    fn missing_tag_is_ignored() {
        let store = FilterStore::default();
        let mut guard = InitialTagGuard::new();
        assert!(!guard.apply(&store, None));
        assert_eq!(guard.last_applied(), None);
    }
}
