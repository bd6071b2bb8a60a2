//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as storage,
//! cache invalidation, and the browser window host.

pub mod affiliate;
pub mod cache;
pub mod event;
pub mod market;
pub mod session;
pub mod settings;
pub mod window;
