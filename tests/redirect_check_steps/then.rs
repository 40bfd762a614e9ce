//! Then steps for redirect rule check BDD scenarios.

use super::world::RedirectCheckWorld;
use relaycheck::redirect_check::services::CheckRedirectRulesResponse;
use rstest_bdd_macros::then;

fn ensure_error(response: &CheckRedirectRulesResponse) -> Result<(), eyre::Report> {
    if response.is_success() || response.error.is_empty() || !response.output.is_empty() {
        return Err(eyre::eyre!("expected error response, got {response:?}"));
    }
    Ok(())
}

#[then("the check succeeds")]
fn check_succeeds(world: &RedirectCheckWorld) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if !response.is_success() {
        return Err(eyre::eyre!("expected success, got {response:?}"));
    }
    Ok(())
}

#[then("the check fails")]
fn check_fails(world: &RedirectCheckWorld) -> Result<(), eyre::Report> {
    ensure_error(world.response()?)
}

#[then(r#"the check fails with "{message}""#)]
fn check_fails_with(world: &RedirectCheckWorld, message: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    ensure_error(response)?;
    if response.error != message {
        return Err(eyre::eyre!(
            "expected error '{message}', got '{}'",
            response.error
        ));
    }
    Ok(())
}

#[then(r#"the output reads "{expected}""#)]
fn output_reads(world: &RedirectCheckWorld, expected: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    let expected = expected.replace("\\n", "\n");
    if response.output != expected {
        return Err(eyre::eyre!(
            "expected output {expected:?}, got {:?}",
            response.output
        ));
    }
    Ok(())
}

#[then(r#"the output contains "{fragment}""#)]
fn output_contains(world: &RedirectCheckWorld, fragment: String) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if !response.output.contains(&fragment) {
        return Err(eyre::eyre!(
            "expected output to contain {fragment:?}, got {:?}",
            response.output
        ));
    }
    Ok(())
}

#[then("the output is empty")]
fn output_is_empty(world: &RedirectCheckWorld) -> Result<(), eyre::Report> {
    let response = world.response()?;
    if !response.output.is_empty() {
        return Err(eyre::eyre!("expected empty output, got {:?}", response.output));
    }
    Ok(())
}

#[then("the report contains {count:usize} blocks")]
fn report_contains_blocks(world: &RedirectCheckWorld, count: usize) -> Result<(), eyre::Report> {
    let response = world.response()?;
    let blocks = response
        .output
        .lines()
        .filter(|line| {
            line.starts_with("#Redirect Rules Check for")
                || line.starts_with("#Failed Redirect Rules")
        })
        .count();
    if blocks != count {
        return Err(eyre::eyre!("expected {count} blocks, found {blocks}"));
    }
    Ok(())
}
