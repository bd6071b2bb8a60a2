//! Shared filter state on a watch channel.

use tokio::sync::watch;

use crate::domain::criteria::{Frequency, ListCriteria};
use crate::domain::event::EventStatus;
use crate::domain::tag::{ListingTag, TAG_TRENDING};

/// The active filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub tag: String,
    pub main_tag: String,
    pub bookmarked: bool,
    pub frequency: Frequency,
    pub status: EventStatus,
    pub hide_sports: bool,
    pub hide_crypto: bool,
    pub hide_earnings: bool,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            tag: TAG_TRENDING.to_string(),
            main_tag: TAG_TRENDING.to_string(),
            bookmarked: false,
            frequency: Frequency::All,
            status: EventStatus::Active,
            hide_sports: false,
            hide_crypto: false,
            hide_earnings: false,
        }
    }
}

impl FilterState {
    /// Initial state with `initial_tag` applied to both `tag` and `main_tag`.
    #[must_use]
    pub fn with_initial_tag(initial_tag: Option<&str>) -> Self {
        let mut state = Self::default();
        if let Some(tag) = initial_tag {
            state.tag = tag.to_string();
            state.main_tag = tag.to_string();
        }
        state
    }

    /// Listing criteria for this selection. Viewer, locale, and paging are
    /// left at their defaults.
    #[must_use]
    pub fn to_criteria(&self) -> ListCriteria {
        ListCriteria {
            tag: ListingTag::from_slug(&self.tag),
            search: self.search.clone(),
            bookmarked: self.bookmarked,
            status: self.status,
            frequency: self.frequency,
            hide_sports: self.hide_sports,
            hide_crypto: self.hide_crypto,
            hide_earnings: self.hide_earnings,
            ..ListCriteria::default()
        }
    }
}

/// A partial update. Unset fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPatch {
    pub search: Option<String>,
    pub tag: Option<String>,
    pub main_tag: Option<String>,
    pub bookmarked: Option<bool>,
    pub frequency: Option<Frequency>,
    pub status: Option<EventStatus>,
    pub hide_sports: Option<bool>,
    pub hide_crypto: Option<bool>,
    pub hide_earnings: Option<bool>,
}

impl FilterPatch {
    #[must_use]
    pub fn search(value: impl Into<String>) -> Self {
        Self {
            search: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tag(value: impl Into<String>) -> Self {
        Self {
            tag: Some(value.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    fn apply_to(self, state: &mut FilterState) {
        if let Some(search) = self.search {
            state.search = search;
        }
        if let Some(tag) = self.tag {
            state.tag = tag;
        }
        if let Some(main_tag) = self.main_tag {
            state.main_tag = main_tag;
        }
        if let Some(bookmarked) = self.bookmarked {
            state.bookmarked = bookmarked;
        }
        if let Some(frequency) = self.frequency {
            state.frequency = frequency;
        }
        if let Some(status) = self.status {
            state.status = status;
        }
        if let Some(hide) = self.hide_sports {
            state.hide_sports = hide;
        }
        if let Some(hide) = self.hide_crypto {
            state.hide_crypto = hide;
        }
        if let Some(hide) = self.hide_earnings {
            state.hide_earnings = hide;
        }
    }
}

/// Owner of the filter state. Updates merge under the channel lock, so
/// watchers never see a half-applied patch.
#[derive(Debug)]
pub struct FilterStore {
    tx: watch::Sender<FilterState>,
}

impl FilterStore {
    #[must_use]
    pub fn new(initial_tag: Option<&str>) -> Self {
        let (tx, _rx) = watch::channel(FilterState::with_initial_tag(initial_tag));
        Self { tx }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> FilterState {
        self.tx.borrow().clone()
    }

    /// Merge `patch` into the state and notify every watcher.
    ///
    /// No validation happens here; values are checked when turned into
    /// listing criteria.
    pub fn update_filters(&self, patch: FilterPatch) {
        self.tx.send_modify(|state| patch.apply_to(state));
    }

    /// Select a main category, moving `tag` along with it.
    pub fn select_main_category(&self, slug: &str) {
        self.update_filters(FilterPatch {
            tag: Some(slug.to_string()),
            main_tag: Some(slug.to_string()),
            ..FilterPatch::default()
        });
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FilterState> {
        self.tx.subscribe()
    }
}

impl Default for FilterStore {
    fn default() -> Self {
        Self::new(None)
    }
}
