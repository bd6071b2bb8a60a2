//! Listing-pipeline domain types. No I/O lives here.

pub mod affiliate;
pub mod cache_tag;
pub mod criteria;
pub mod error;
pub mod event;
pub mod id;
pub mod locale;
pub mod market;
pub mod notification;
pub mod settings;
pub mod tag;
pub mod viewer;
