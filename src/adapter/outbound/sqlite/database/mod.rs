//! Diesel connection pool, schema and row models.

pub mod connection;
pub mod model;
pub mod schema;
