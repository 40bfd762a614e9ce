//! Shared test helpers for in-memory redirect rule check integration tests.

use mockable::DefaultClock;
use relaycheck::redirect_check::{
    adapters::{
        ContainerValueTransformer,
        memory::InMemoryPayloadParameters,
        rpc::{ChannelRedirectRulesClient, RpcChannel},
    },
    domain::{
        ParameterDefinition, ParameterInstance, PayloadId, PayloadUuid, ProfileId, ProfileName,
        ProfileRef,
    },
    services::RedirectRulesCheckService,
};
use rstest::fixture;
use std::sync::Arc;
use std::time::Duration;

/// Payload identifier seeded by [`seed_payload`].
pub const PAYLOAD_UUID: &str = "0d4f4a5e-8b1b-4f5f-b4d2-6a3e2f1c9b70";

/// Check service wired to the shared channel.
pub type ChannelCheckService = RedirectRulesCheckService<
    InMemoryPayloadParameters,
    ContainerValueTransformer,
    ChannelRedirectRulesClient,
    DefaultClock,
>;

/// Components of a wired check pipeline.
pub struct Pipeline {
    /// Parameter store backing the service.
    pub repository: Arc<InMemoryPayloadParameters>,
    /// Channel that profile responders bind to.
    pub channel: RpcChannel,
    /// Service under test.
    pub service: ChannelCheckService,
}

/// Provides a pipeline with a short reply bound.
#[fixture]
pub fn pipeline() -> Pipeline {
    let repository = Arc::new(InMemoryPayloadParameters::new());
    let channel = RpcChannel::new(Duration::from_millis(250), 16);
    let service = RedirectRulesCheckService::new(
        Arc::clone(&repository),
        Arc::new(ContainerValueTransformer::new()),
        Arc::new(ChannelRedirectRulesClient::new(channel.clone())),
        Arc::new(DefaultClock),
    );
    Pipeline {
        repository,
        channel,
        service,
    }
}

/// Builds a profile reference.
///
/// # Panics
///
/// Panics when `name` is blank.
#[must_use]
pub fn profile(id: i32, name: &str) -> ProfileRef {
    ProfileRef::new(
        ProfileId::new(id),
        ProfileName::new(name).expect("profile name should be valid"),
    )
}

/// Builds a non-crypto parameter instance.
///
/// # Panics
///
/// Panics when `name` is blank.
#[must_use]
pub fn parameter(
    owner: &ProfileRef,
    name: &str,
    declared_type: &str,
    value: &str,
) -> ParameterInstance {
    ParameterInstance::new(
        owner.clone(),
        ParameterDefinition::new(name, declared_type, false)
            .expect("parameter definition should be valid"),
        value,
    )
}

/// Registers [`PAYLOAD_UUID`] and stores its parameter instances.
///
/// # Errors
///
/// Returns an error if the store rejects any write.
pub fn seed_payload(
    repository: &InMemoryPayloadParameters,
    instances: Vec<ParameterInstance>,
) -> Result<PayloadId, Box<dyn std::error::Error + Send + Sync>> {
    let payload_id = PayloadId::new(11);
    repository.insert_payload(PayloadUuid::new(PAYLOAD_UUID)?, payload_id)?;
    for instance in instances {
        repository.add_instance(payload_id, instance)?;
    }
    Ok(payload_id)
}
