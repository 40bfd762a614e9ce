//! JSON request/response envelope for redirect rule checks.
//!
//! Requests look like `{"input": {"uuid": "<payload uuid>"}}`. Responses
//! always carry `status`, `output` and `error`; individual profile failures
//! stay inside `output` and never change `status`.

use super::{RedirectCheckServiceError, RedirectRulesCheckService};
use crate::redirect_check::ports::{
    ParameterTransformer, PayloadParameterRepository, RedirectRulesClient,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Message returned when stored parameters cannot be loaded. The detail is
/// only logged.
pub const PARAMETER_LOAD_FAILURE: &str = "Failed to find C2 Profile Parameters";

/// Message returned when the payload lookup itself fails under the reject
/// policy.
pub const PAYLOAD_LOOKUP_FAILURE: &str = "Failed to find payload";

/// Inbound request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRedirectRulesInput {
    /// Payload selection.
    pub input: PayloadSelector,
}

/// Identifies the payload whose profiles are checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadSelector {
    /// External payload identifier.
    pub uuid: String,
}

impl CheckRedirectRulesInput {
    /// Creates a request for a payload identifier.
    #[must_use]
    pub fn new(uuid: impl Into<String>) -> Self {
        Self {
            input: PayloadSelector { uuid: uuid.into() },
        }
    }
}

/// Request-level status of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    /// The report was produced.
    Success,
    /// The request was rejected or stored parameters could not be loaded.
    Error,
}

/// Outbound response envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckRedirectRulesResponse {
    /// Request-level status.
    pub status: ResponseStatus,
    /// Rendered report on success; empty on error.
    pub output: String,
    /// Error description on error; empty on success.
    pub error: String,
}

impl CheckRedirectRulesResponse {
    /// Creates a successful response.
    #[must_use]
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            output: output.into(),
            error: String::new(),
        }
    }

    /// Creates an error response with empty output.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Error,
            output: String::new(),
            error: message.into(),
        }
    }

    /// Returns `true` for a successful response.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResponseStatus::Success
    }
}

impl From<RedirectCheckServiceError> for CheckRedirectRulesResponse {
    fn from(err: RedirectCheckServiceError) -> Self {
        match err {
            RedirectCheckServiceError::InvalidInput(_)
            | RedirectCheckServiceError::PayloadNotFound(_) => Self::error(err.to_string()),
            RedirectCheckServiceError::PayloadLookup(_) => Self::error(PAYLOAD_LOOKUP_FAILURE),
            RedirectCheckServiceError::ParameterLoad(_) => Self::error(PARAMETER_LOAD_FAILURE),
        }
    }
}

impl<R, T, C, K> RedirectRulesCheckService<R, T, C, K>
where
    R: PayloadParameterRepository,
    T: ParameterTransformer,
    C: RedirectRulesClient,
    K: Clock + Send + Sync,
{
    /// Decodes a JSON request body, runs the check and builds the response.
    pub async fn handle_json(&self, body: &[u8]) -> CheckRedirectRulesResponse {
        match serde_json::from_slice::<CheckRedirectRulesInput>(body) {
            Ok(input) => self.respond(&input).await,
            Err(err) => {
                tracing::warn!(error = %err, "failed to parse redirect rules check request");
                CheckRedirectRulesResponse::error(format!(
                    "Failed to parse out required parameters: {err}"
                ))
            }
        }
    }

    /// Runs the check for a decoded request and builds the response.
    pub async fn respond(&self, input: &CheckRedirectRulesInput) -> CheckRedirectRulesResponse {
        match self.check(&input.input.uuid).await {
            Ok(report) => CheckRedirectRulesResponse::success(report.render()),
            Err(err) => err.into(),
        }
    }
}
