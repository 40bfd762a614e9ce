//! Step definitions for redirect rule check scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;
