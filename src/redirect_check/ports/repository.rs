//! Repository port for payload and profile parameter lookups.

use crate::redirect_check::domain::{ParameterInstance, PayloadId, PayloadUuid};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for payload parameter repository operations.
pub type PayloadRepositoryResult<T> = Result<T, PayloadRepositoryError>;

/// Read-only access to payloads and their stored profile parameters.
#[async_trait]
pub trait PayloadParameterRepository: Send + Sync {
    /// Resolves an external payload identifier to its internal id.
    ///
    /// Returns `None` when no payload has the given identifier.
    async fn find_payload_id(
        &self,
        uuid: &PayloadUuid,
    ) -> PayloadRepositoryResult<Option<PayloadId>>;

    /// Loads every parameter instance stored for a payload, joined with its
    /// owning profile and parameter definition.
    ///
    /// An absent payload id yields no instances.
    ///
    /// # Errors
    ///
    /// Returns [`PayloadRepositoryError::Persistence`] when the data store
    /// fails or [`PayloadRepositoryError::InvalidPersistedData`] when a row
    /// cannot be reconstructed into domain types.
    async fn load_parameter_instances(
        &self,
        payload_id: Option<PayloadId>,
    ) -> PayloadRepositoryResult<Vec<ParameterInstance>>;
}

/// Errors returned by payload parameter repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PayloadRepositoryError {
    /// Persisted data could not be reconstructed into domain types.
    #[error("invalid persisted data: {0}")]
    InvalidPersistedData(Arc<dyn std::error::Error + Send + Sync>),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PayloadRepositoryError {
    /// Wraps a data-quality error from persisted rows.
    pub fn invalid_persisted_data(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::InvalidPersistedData(Arc::new(err))
    }

    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
