//! Error types for redirect check domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing redirect check domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RedirectDomainError {
    /// The payload UUID is empty after trimming.
    #[error("payload uuid must not be empty")]
    EmptyPayloadUuid,

    /// The profile name is empty after trimming.
    #[error("profile name must not be empty")]
    EmptyProfileName,

    /// The profile name carries leading or trailing whitespace.
    #[error("profile name '{0}' has surrounding whitespace")]
    PaddedProfileName(String),

    /// The parameter name is empty after trimming.
    #[error("parameter name must not be empty")]
    EmptyParameterName,
}

/// Error returned while parsing a declared parameter type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown parameter type: {0}")]
pub struct ParseParameterTypeError(pub String);
