//! Port contracts for redirect rule checks.
//!
//! Ports define infrastructure-agnostic interfaces used by the check
//! service: stored parameter access, value transformation and the RPC
//! client that reaches profile backends.

pub mod repository;
pub mod rpc;
pub mod transformer;

pub use repository::{PayloadParameterRepository, PayloadRepositoryError, PayloadRepositoryResult};
pub use rpc::{
    RedirectRulesClient, RedirectRulesReply, RedirectRulesRequest, RpcError, RpcResult,
};
pub use transformer::{ParameterTransformer, TransformError};

#[cfg(test)]
pub use transformer::MockParameterTransformer;
