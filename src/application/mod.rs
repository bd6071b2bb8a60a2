//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the listing pipeline, admin mutations, and the
//! client-side filter state.

pub mod admin;
pub mod affiliate;
pub mod cache;
pub mod context;
pub mod filter;
pub mod listing;
pub mod market;
pub mod push;
pub mod ranking;
pub mod settings;
