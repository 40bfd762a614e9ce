//! When steps for redirect rule check BDD scenarios.

use super::world::{PAYLOAD_UUID, RedirectCheckWorld, run_async};
use relaycheck::redirect_check::services::CheckRedirectRulesInput;
use rstest_bdd_macros::when;

#[when("the redirect rules check runs")]
fn check_runs(world: &mut RedirectCheckWorld) {
    let input = CheckRedirectRulesInput::new(PAYLOAD_UUID);
    world.last_response = Some(run_async(world.service.respond(&input)));
}

#[when(r#"the redirect rules check runs for payload "{uuid}""#)]
fn check_runs_for(world: &mut RedirectCheckWorld, uuid: String) {
    let input = CheckRedirectRulesInput::new(uuid);
    world.last_response = Some(run_async(world.service.respond(&input)));
}
