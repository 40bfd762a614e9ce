//! Envelope handling tests for redirect rule checks.

use super::helpers::{PAYLOAD_UUID, Pipeline, parameter, pipeline, profile, seed_payload};
use relaycheck::redirect_check::{
    adapters::rpc::serve_redirect_rules,
    domain::ProfileName,
    ports::RedirectRulesReply,
    services::{CheckRedirectRulesResponse, PARAMETER_LOAD_FAILURE},
};
use rstest::rstest;
use serde_json::json;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn json_request_produces_json_response(pipeline: Pipeline) {
    let http = profile(1, "http");
    seed_payload(
        &pipeline.repository,
        vec![parameter(&http, "callback_host", "String", "https://c2.example")],
    )
    .expect("seed payload");
    let http_name = ProfileName::new("http").expect("valid profile name");
    serve_redirect_rules(&pipeline.channel, &http_name, |_call| async {
        RedirectRulesReply::success("RewriteEngine On")
    })
    .expect("serve http");

    let body = serde_json::to_vec(&json!({"input": {"uuid": PAYLOAD_UUID}})).expect("encode");
    let response = pipeline.service.handle_json(&body).await;

    assert_eq!(
        serde_json::to_value(&response).expect("response encodes"),
        json!({
            "status": "success",
            "output": "#Redirect Rules Check for http\nRewriteEngine On\n",
            "error": "",
        })
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn load_failure_response_hides_details(pipeline: Pipeline) {
    seed_payload(&pipeline.repository, Vec::new()).expect("seed payload");
    pipeline
        .repository
        .fail_loads_with("connection refused")
        .expect("configure failure");

    let body = serde_json::to_vec(&json!({"input": {"uuid": PAYLOAD_UUID}})).expect("encode");
    let response = pipeline.service.handle_json(&body).await;

    assert_eq!(response, CheckRedirectRulesResponse::error(PARAMETER_LOAD_FAILURE));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn extra_request_fields_are_ignored(pipeline: Pipeline) {
    let body = br#"{"input": {"uuid": "unknown", "extra": 1}, "action": "check"}"#;

    let response = pipeline.service.handle_json(body).await;

    assert!(response.is_success());
    assert_eq!(response.output, "");
}
