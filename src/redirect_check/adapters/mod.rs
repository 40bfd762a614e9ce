//! Adapter implementations for redirect check ports.

pub mod memory;
pub mod postgres;
pub mod rpc;

mod transform;

pub use transform::ContainerValueTransformer;
