//! SQLite adapters for every storage port.

mod convert;
pub mod database;

pub mod affiliate;
pub mod event;
pub mod market;
pub mod session;
pub mod settings;
pub mod tag_cache;

pub use affiliate::SqliteAffiliateStore;
pub use event::SqliteEventStore;
pub use market::SqliteMarketStore;
pub use session::SqliteSessionStore;
pub use settings::SqliteSettingsStore;
