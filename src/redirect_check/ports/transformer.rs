//! Transform port turning stored parameter values into typed values.

use crate::redirect_check::domain::{
    ParameterInstance, ParameterType, ParameterValue, ParseParameterTypeError,
};
use thiserror::Error;

/// Converts a stored, possibly crypto-classified value into the typed value
/// a profile backend expects.
#[cfg_attr(test, mockall::automock)]
pub trait ParameterTransformer: Send + Sync {
    /// Transforms a single parameter instance.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError`] when the declared type is unknown or the
    /// raw value does not match it.
    fn transform(&self, instance: &ParameterInstance) -> Result<ParameterValue, TransformError>;
}

/// Errors returned while transforming a single parameter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransformError {
    /// The definition declares a type this transformer does not know.
    #[error(transparent)]
    UnknownType(#[from] ParseParameterTypeError),

    /// The raw value does not parse as the declared type.
    #[error("invalid {parameter_type} value: {reason}")]
    InvalidValue {
        /// Declared parameter type.
        parameter_type: ParameterType,
        /// Parse failure description.
        reason: String,
    },
}

impl TransformError {
    /// Builds an [`TransformError::InvalidValue`] from any displayable cause.
    pub fn invalid_value(parameter_type: ParameterType, reason: impl ToString) -> Self {
        Self::InvalidValue {
            parameter_type,
            reason: reason.to_string(),
        }
    }
}
