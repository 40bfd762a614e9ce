//! In-memory adapters for tests and deterministic local flows.

mod client;
mod repository;

pub use client::ScriptedRedirectRulesClient;
pub use repository::InMemoryPayloadParameters;
