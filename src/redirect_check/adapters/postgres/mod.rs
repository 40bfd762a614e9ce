//! `PostgreSQL` adapters for payload parameter lookups.

mod models;
mod repository;
mod schema;

pub use repository::{PayloadPgPool, PostgresPayloadParameters};
