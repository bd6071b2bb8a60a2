//! eventfeed - event listing, cache-tag invalidation, and filter state for a
//! locale-aware prediction-market site.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure types: events, markets, tags, criteria, locales,
//!   settings, cache tags and the mutation-to-tag mapping
//! - [`port`] - Traits the application depends on (stores, cache
//!   invalidation, the browser window host)
//! - [`application`] - Use cases: listing and ranking, admin mutations,
//!   settings resolution, market search/status, affiliate redirects, the
//!   filter store, and push click routing
//! - [`adapter`] - SQLite (Diesel) storage, the warp HTTP surface, and the CLI
//! - [`infrastructure`] - Configuration, logging, and the composition root
//!
//! # Features
//!
//! - `testkit` - Fixture builders for integration tests
//!
//! # Example
//!
//! ```no_run
//! use eventfeed::infrastructure::bootstrap::{build_context, connect};
//! use eventfeed::infrastructure::config::settings::Config;
//!
//! # async fn run() -> eventfeed::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let ctx = build_context(&config, connect(&config)?);
//! let page = ctx.listing.list_events(&Default::default()).await;
//! assert!(page.error.is_none());
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
