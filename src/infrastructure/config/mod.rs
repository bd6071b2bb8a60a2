//! Infrastructure configuration modules.

pub mod affiliate;
pub mod database;
pub mod listing;
pub mod logging;
pub mod server;
pub mod settings;
