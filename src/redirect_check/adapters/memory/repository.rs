//! In-memory payload parameter repository.

use crate::redirect_check::{
    domain::{ParameterInstance, PayloadId, PayloadUuid},
    ports::{PayloadParameterRepository, PayloadRepositoryError, PayloadRepositoryResult},
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Thread-safe in-memory store of payloads and their parameter instances.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPayloadParameters {
    state: Arc<RwLock<InMemoryPayloadState>>,
}

#[derive(Debug, Default)]
struct InMemoryPayloadState {
    payloads: HashMap<PayloadUuid, PayloadId>,
    instances: HashMap<PayloadId, Vec<ParameterInstance>>,
    lookup_failure: Option<String>,
    load_failure: Option<String>,
}

impl InMemoryPayloadParameters {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a payload identifier.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn insert_payload(&self, uuid: PayloadUuid, id: PayloadId) -> PayloadRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.payloads.insert(uuid, id);
        Ok(())
    }

    /// Stores a parameter instance for a payload, after any existing ones.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn add_instance(
        &self,
        payload_id: PayloadId,
        instance: ParameterInstance,
    ) -> PayloadRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.instances.entry(payload_id).or_default().push(instance);
        Ok(())
    }

    /// Makes every subsequent payload lookup fail with the given message.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn fail_lookups_with(&self, message: impl Into<String>) -> PayloadRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.lookup_failure = Some(message.into());
        Ok(())
    }

    /// Makes every subsequent parameter load fail with the given message.
    ///
    /// # Errors
    ///
    /// Returns persistence errors when lock acquisition fails.
    pub fn fail_loads_with(&self, message: impl Into<String>) -> PayloadRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.load_failure = Some(message.into());
        Ok(())
    }
}

#[async_trait]
impl PayloadParameterRepository for InMemoryPayloadParameters {
    async fn find_payload_id(
        &self,
        uuid: &PayloadUuid,
    ) -> PayloadRepositoryResult<Option<PayloadId>> {
        let state = self.state.read().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if let Some(message) = &state.lookup_failure {
            return Err(PayloadRepositoryError::persistence(std::io::Error::other(
                message.clone(),
            )));
        }

        Ok(state.payloads.get(uuid).copied())
    }

    async fn load_parameter_instances(
        &self,
        payload_id: Option<PayloadId>,
    ) -> PayloadRepositoryResult<Vec<ParameterInstance>> {
        let state = self.state.read().map_err(|err| {
            PayloadRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;

        if let Some(message) = &state.load_failure {
            return Err(PayloadRepositoryError::persistence(std::io::Error::other(
                message.clone(),
            )));
        }

        Ok(payload_id
            .and_then(|id| state.instances.get(&id))
            .cloned()
            .unwrap_or_default())
    }
}
