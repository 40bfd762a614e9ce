//! RPC client port for profile backend redirect rule evaluation.

use crate::redirect_check::domain::{ParameterValue, ProfileName};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Result type for RPC client operations.
pub type RpcResult<T> = Result<T, RpcError>;

/// Request asking one profile backend to evaluate its redirect rules.
///
/// Serializes as `{"name": "<profile>", "parameters": {..}}` with each
/// parameter encoded as described on [`ParameterValue`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RedirectRulesRequest {
    name: ProfileName,
    parameters: BTreeMap<String, ParameterValue>,
}

impl RedirectRulesRequest {
    /// Creates a request for a profile.
    #[must_use]
    pub const fn new(name: ProfileName, parameters: BTreeMap<String, ParameterValue>) -> Self {
        Self { name, parameters }
    }

    /// Returns the addressed profile.
    #[must_use]
    pub const fn name(&self) -> &ProfileName {
        &self.name
    }

    /// Returns the typed parameters.
    #[must_use]
    pub const fn parameters(&self) -> &BTreeMap<String, ParameterValue> {
        &self.parameters
    }
}

/// Reply returned by a profile backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectRulesReply {
    /// Whether the backend evaluated the rules successfully.
    pub success: bool,
    /// Backend output on success.
    pub message: String,
    /// Backend error text on failure.
    pub error: String,
}

impl RedirectRulesReply {
    /// Creates a successful reply.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            error: String::new(),
        }
    }

    /// Creates a failed reply.
    #[must_use]
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: String::new(),
            error: error.into(),
        }
    }
}

/// Client contract for reaching profile backends.
///
/// Implementations must deliver the reply that corresponds to this request
/// even when many requests share the underlying channel.
#[async_trait]
pub trait RedirectRulesClient: Send + Sync {
    /// Sends the request to the named profile's backend and awaits its
    /// reply.
    ///
    /// # Errors
    ///
    /// Returns [`RpcError`] when no reply could be obtained.
    async fn get_redirect_rules(
        &self,
        request: &RedirectRulesRequest,
    ) -> RpcResult<RedirectRulesReply>;
}

/// Transport failures on the RPC channel.
#[derive(Debug, Clone, Error)]
pub enum RpcError {
    /// Nothing is bound to the routing key, or its responder went away.
    #[error("no responder bound to '{0}'")]
    NoResponder(String),

    /// A responder is already bound to the routing key.
    #[error("routing key '{0}' is already bound")]
    AlreadyBound(String),

    /// No reply arrived within the configured bound.
    #[error("no reply from '{routing_key}' within {timeout:?}")]
    Timeout {
        /// Routing key the request was sent to.
        routing_key: String,
        /// Configured wait bound.
        timeout: Duration,
    },

    /// The responder dropped the request without replying.
    #[error("responder for '{0}' closed the request without a reply")]
    Closed(String),

    /// The request or reply body could not be encoded or decoded.
    #[error("rpc codec error: {0}")]
    Codec(Arc<dyn std::error::Error + Send + Sync>),

    /// Any other channel failure.
    #[error("rpc transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl RpcError {
    /// Wraps a serialization error.
    pub fn codec(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Codec(Arc::new(err))
    }

    /// Wraps a channel failure.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
