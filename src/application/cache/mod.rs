//! Tagged render caching and mutation-driven invalidation.
//!
//! - [`response::ResponseCache`]: serialized responses keyed by request, tagged by entity
//! - [`invalidation::InvalidationRegistry`]: fans a recorded mutation out to every cache

pub mod invalidation;
pub mod response;
