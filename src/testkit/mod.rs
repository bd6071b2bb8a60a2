//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`db`] - Throwaway migrated SQLite databases and an [`AppContext`]
//!   wired over them.
//! - [`fixture`] - Builders for event, market, and tag rows.
//!
//! [`AppContext`]: crate::application::context::AppContext

pub mod db;
pub mod fixture;
