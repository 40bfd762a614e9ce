//! Redirect rule checks for the communication profiles bound to a payload.
//!
//! Loads every stored profile parameter for a payload, groups the parameters
//! by owning profile, converts them into typed values and asks each
//! profile's backend to evaluate its redirect rules. Outcomes from every
//! profile are merged into a single textual report. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
