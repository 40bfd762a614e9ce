//! Redirect rule check pipeline.

use crate::config::UnresolvedPayloadPolicy;
use crate::redirect_check::{
    domain::{
        DroppedParameter, ParameterInstance, PayloadId, PayloadUuid, ProfileName, ProfileOutcome,
        ProfileParameterSets, RedirectDomainError, RedirectRulesReport, TransformedParameters,
    },
    ports::{
        ParameterTransformer, PayloadParameterRepository, PayloadRepositoryError,
        RedirectRulesClient, RedirectRulesRequest,
    },
};
use futures::future::join_all;
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Request-level errors. Per-parameter and per-profile failures never
/// surface here; they are recorded in the report instead.
#[derive(Debug, Error)]
pub enum RedirectCheckServiceError {
    /// The payload identifier is missing or blank.
    #[error(transparent)]
    InvalidInput(#[from] RedirectDomainError),

    /// The payload identifier did not resolve and the policy rejects
    /// unresolved payloads.
    #[error("payload not found: {0}")]
    PayloadNotFound(PayloadUuid),

    /// The payload lookup failed and the policy rejects unresolved payloads.
    #[error("payload lookup failed: {0}")]
    PayloadLookup(#[source] PayloadRepositoryError),

    /// Stored parameters could not be loaded.
    #[error("failed to load profile parameters: {0}")]
    ParameterLoad(#[source] PayloadRepositoryError),
}

/// Result type for check service operations.
pub type RedirectCheckServiceResult<T> = Result<T, RedirectCheckServiceError>;

/// Runs redirect rule checks for every profile bound to a payload.
///
/// Profile groups are transformed and dispatched concurrently over the
/// injected client; the report is returned only once every group has an
/// outcome.
pub struct RedirectRulesCheckService<R, T, C, K>
where
    R: PayloadParameterRepository,
    T: ParameterTransformer,
    C: RedirectRulesClient,
    K: Clock + Send + Sync,
{
    repository: Arc<R>,
    transformer: Arc<T>,
    client: Arc<C>,
    clock: Arc<K>,
    unresolved_payload: UnresolvedPayloadPolicy,
}

impl<R, T, C, K> Clone for RedirectRulesCheckService<R, T, C, K>
where
    R: PayloadParameterRepository,
    T: ParameterTransformer,
    C: RedirectRulesClient,
    K: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            transformer: Arc::clone(&self.transformer),
            client: Arc::clone(&self.client),
            clock: Arc::clone(&self.clock),
            unresolved_payload: self.unresolved_payload,
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
    /// Creates a check service that tolerates unresolved payloads.
    #[must_use]
    pub const fn new(
        repository: Arc<R>,
        transformer: Arc<T>,
        client: Arc<C>,
        clock: Arc<K>,
    ) -> Self {
        Self {
            repository,
            transformer,
            client,
            clock,
            unresolved_payload: UnresolvedPayloadPolicy::Continue,
        }
    }

    /// Sets how unresolved payload identifiers are handled.
    #[must_use]
    pub const fn with_unresolved_payload_policy(mut self, policy: UnresolvedPayloadPolicy) -> Self {
        self.unresolved_payload = policy;
        self
    }

    /// Checks the redirect rules of every profile bound to a payload.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectCheckServiceError::InvalidInput`] for a blank
    /// identifier, [`RedirectCheckServiceError::ParameterLoad`] when stored
    /// parameters cannot be loaded, and the payload resolution errors when
    /// the policy is [`UnresolvedPayloadPolicy::Reject`].
    pub async fn check(
        &self,
        payload_uuid: &str,
    ) -> RedirectCheckServiceResult<RedirectRulesReport> {
        let uuid = PayloadUuid::new(payload_uuid)?;
        let payload_id = self.resolve_payload(&uuid).await?;

        let instances = self
            .repository
            .load_parameter_instances(payload_id)
            .await
            .map_err(|err| {
                tracing::error!(
                    payload_uuid = %uuid,
                    error = %err,
                    "failed to fetch profile parameters for payload"
                );
                RedirectCheckServiceError::ParameterLoad(err)
            })?;

        let groups = ProfileParameterSets::from_instances(instances);
        tracing::debug!(
            payload_uuid = %uuid,
            profiles = groups.len(),
            "dispatching redirect rule checks"
        );

        let outcomes = join_all(
            groups
                .into_iter()
                .map(|(profile, group)| self.check_profile(profile, group)),
        )
        .await;

        let report = RedirectRulesReport::new(outcomes, &*self.clock);
        tracing::info!(
            payload_uuid = %uuid,
            profiles = report.outcomes().len(),
            failures = report.failure_count(),
            generated_at = %report.generated_at(),
            "redirect rules report assembled"
        );
        Ok(report)
    }

    /// Transforms one profile group, dropping parameters whose transform
    /// fails.
    #[must_use]
    pub fn transform_group(
        &self,
        profile: &ProfileName,
        instances: &[ParameterInstance],
    ) -> TransformedParameters {
        let mut transformed = TransformedParameters::new();
        for instance in instances {
            let name = instance.definition().name();
            match self.transformer.transform(instance) {
                Ok(value) => {
                    tracing::debug!(
                        profile = %profile,
                        parameter = name,
                        kind = value.kind(),
                        "transformed profile parameter"
                    );
                    transformed.insert(name, value);
                }
                Err(err) => {
                    tracing::warn!(
                        profile = %profile,
                        parameter = name,
                        error = %err,
                        "dropping profile parameter that failed to transform"
                    );
                    transformed.record_drop(DroppedParameter::new(name, err.to_string()));
                }
            }
        }
        transformed
    }

    /// Sends one profile's parameters to its backend and records the
    /// outcome. Never fails; transport and backend failures become outcomes.
    pub async fn dispatch(
        &self,
        profile: ProfileName,
        parameters: TransformedParameters,
    ) -> ProfileOutcome {
        let started_at = self.clock.utc();
        let (values, dropped) = parameters.into_parts();
        let request = RedirectRulesRequest::new(profile.clone(), values);
        let outcome = match self.client.get_redirect_rules(&request).await {
            Err(err) => {
                tracing::warn!(profile = %profile, error = %err, "redirect rules rpc failed");
                ProfileOutcome::unreachable(profile, err.to_string(), &*self.clock)
            }
            Ok(reply) if !reply.success => {
                tracing::info!(profile = %profile, "profile reported failed redirect rules");
                ProfileOutcome::rejected(profile, reply.error, &*self.clock)
            }
            Ok(reply) => {
                tracing::info!(profile = %profile, "redirect rules check completed");
                ProfileOutcome::passed(profile, reply.message, &*self.clock)
            }
        };

        tracing::debug!(
            profile = %outcome.profile(),
            elapsed_ms = (outcome.completed_at() - started_at).num_milliseconds(),
            dropped = dropped.len(),
            "profile dispatch finished"
        );
        outcome.with_dropped(dropped)
    }

    async fn check_profile(
        &self,
        profile: ProfileName,
        instances: Vec<ParameterInstance>,
    ) -> ProfileOutcome {
        let parameters = self.transform_group(&profile, &instances);
        self.dispatch(profile, parameters).await
    }

    async fn resolve_payload(
        &self,
        uuid: &PayloadUuid,
    ) -> RedirectCheckServiceResult<Option<PayloadId>> {
        let lookup = self.repository.find_payload_id(uuid).await;
        let failure = match lookup {
            Ok(Some(id)) => return Ok(Some(id)),
            Ok(None) => {
                tracing::warn!(payload_uuid = %uuid, "payload not found for redirect rules check");
                RedirectCheckServiceError::PayloadNotFound(uuid.clone())
            }
            Err(err) => {
                tracing::warn!(
                    payload_uuid = %uuid,
                    error = %err,
                    "failed to look up payload for redirect rules check"
                );
                RedirectCheckServiceError::PayloadLookup(err)
            }
        };

        match self.unresolved_payload {
            UnresolvedPayloadPolicy::Continue => Ok(None),
            UnresolvedPayloadPolicy::Reject => Err(failure),
        }
    }
}
