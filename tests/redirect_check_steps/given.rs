//! Given steps for redirect rule check BDD scenarios.

use super::world::{PAYLOAD_UUID, RedirectCheckWorld};
use eyre::WrapErr;
use relaycheck::redirect_check::{
    domain::{
        ParameterDefinition, ParameterInstance, PayloadId, PayloadUuid, ProfileId, ProfileName,
        ProfileRef,
    },
    ports::RedirectRulesReply,
};
use rstest_bdd_macros::given;

const PAYLOAD_ID: PayloadId = PayloadId::new(21);

fn register_payload(world: &RedirectCheckWorld) -> Result<(), eyre::Report> {
    world
        .repository
        .insert_payload(PayloadUuid::new(PAYLOAD_UUID)?, PAYLOAD_ID)
        .wrap_err("register scenario payload")
}

#[given("a payload with no parameters")]
fn payload_without_parameters(world: &mut RedirectCheckWorld) -> Result<(), eyre::Report> {
    register_payload(world)
}

#[given(r#"a payload with parameters for profiles "{first}" and "{second}""#)]
fn payload_with_profiles(
    world: &mut RedirectCheckWorld,
    first: String,
    second: String,
) -> Result<(), eyre::Report> {
    register_payload(world)?;
    for (index, name) in [first, second].into_iter().enumerate() {
        let id = i32::try_from(index).wrap_err("profile index")?;
        let profile = ProfileRef::new(ProfileId::new(id), ProfileName::new(name)?);
        let definition = ParameterDefinition::new("callback_host", "String", false)?;
        let instance = ParameterInstance::new(profile, definition, "https://c2.example");
        world
            .repository
            .add_instance(PAYLOAD_ID, instance)
            .wrap_err("store scenario parameter")?;
    }
    Ok(())
}

#[given(r#"profile "{profile}" answers with rules "{message}""#)]
fn profile_answers(
    world: &mut RedirectCheckWorld,
    profile: String,
    message: String,
) -> Result<(), eyre::Report> {
    world
        .client
        .reply_with(ProfileName::new(profile)?, RedirectRulesReply::success(message))
        .wrap_err("script profile reply")
}

#[given(r#"profile "{profile}" rejects with error "{error}""#)]
fn profile_rejects(
    world: &mut RedirectCheckWorld,
    profile: String,
    error: String,
) -> Result<(), eyre::Report> {
    world
        .client
        .reply_with(ProfileName::new(profile)?, RedirectRulesReply::failure(error))
        .wrap_err("script profile failure")
}

#[given("loading parameters fails")]
fn loading_fails(world: &mut RedirectCheckWorld) -> Result<(), eyre::Report> {
    world
        .repository
        .fail_loads_with("relation \"c2profileparametersinstance\" does not exist")
        .wrap_err("configure load failure")
}
