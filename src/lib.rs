//! Relaycheck: redirect rule validation for payload communication profiles.
//!
//! This crate checks that the traffic redirectors in front of each
//! communication profile bound to a payload are configured the way that
//! profile expects. Rule evaluation itself belongs to each profile's
//! backend; this crate loads the stored profile parameters, turns them into
//! typed values, asks every backend over a shared RPC channel, and merges
//! the answers into one report.
//!
//! # Architecture
//!
//! Relaycheck follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, RPC, etc.)
//!
//! # Modules
//!
//! - [`redirect_check`]: The check pipeline and its ports and adapters
//! - [`config`]: Runtime configuration
//! - [`logging`]: Tracing subscriber setup

pub mod config;
pub mod logging;
pub mod redirect_check;
