//! Client filter state.
//!
//! [`store::FilterStore`] holds the active selection and notifies watchers
//! of every update. [`guard::InitialTagGuard`] applies a route's implied tag
//! once, and [`search::SearchInput`] debounces keystrokes before committing
//! them to the store.

pub mod guard;
pub mod search;
pub mod store;

pub use guard::InitialTagGuard;
pub use search::{SearchInput, SEARCH_DEBOUNCE};
pub use store::{FilterPatch, FilterState, FilterStore};
