//! Check pipeline tests with profile responders served over the channel.

use super::helpers::{PAYLOAD_UUID, Pipeline, parameter, pipeline, profile, seed_payload};
use relaycheck::redirect_check::{
    adapters::rpc::{RedirectRulesCall, serve_redirect_rules},
    domain::{OutcomeStatus, ProfileName},
    ports::RedirectRulesReply,
};
use rstest::rstest;
use serde_json::json;
use std::time::Duration;

fn name(value: &str) -> ProfileName {
    ProfileName::new(value).expect("profile name should be valid")
}

fn echo_host(call: &RedirectRulesCall) -> String {
    call.parameters
        .get("callback_host")
        .and_then(|value| value.as_str())
        .unwrap_or("<none>")
        .to_owned()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn served_profiles_produce_ordered_report(pipeline: Pipeline) {
    let http = profile(1, "http");
    let websocket = profile(2, "websocket");
    seed_payload(
        &pipeline.repository,
        vec![
            parameter(&websocket, "callback_host", "String", "wss://ws.example"),
            parameter(&http, "callback_host", "String", "https://c2.example"),
            parameter(&http, "callback_port", "Number", "443"),
        ],
    )
    .expect("seed payload");

    serve_redirect_rules(&pipeline.channel, &name("http"), |call| async move {
        RedirectRulesReply::success(format!("RewriteRule ^.*$ {}", echo_host(&call)))
    })
    .expect("serve http");
    serve_redirect_rules(&pipeline.channel, &name("websocket"), |_call| async {
        // Finish after http to prove ordering does not follow completion.
        tokio::time::sleep(Duration::from_millis(20)).await;
        RedirectRulesReply::failure("websocket redirectors are not supported")
    })
    .expect("serve websocket");

    let report = pipeline.service.check(PAYLOAD_UUID).await.expect("check");

    assert_eq!(
        report.render(),
        concat!(
            "#Redirect Rules Check for http\n",
            "RewriteRule ^.*$ https://c2.example\n",
            "#Failed Redirect Rules for websocket\n",
            "#websocket redirectors are not supported\n",
        )
    );
    assert_eq!(pipeline.channel.pending_calls().expect("pending"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn responder_receives_typed_wire_values(pipeline: Pipeline) {
    let http = profile(1, "http");
    seed_payload(
        &pipeline.repository,
        vec![
            parameter(&http, "callback_port", "Number", "8443"),
            parameter(&http, "encrypted_exchange_check", "Boolean", "True"),
            parameter(&http, "headers", "Dictionary", r#"{"Host": "cdn.example"}"#),
            parameter(&http, "killdate", "Date", "2031-06-30"),
        ],
    )
    .expect("seed payload");

    serve_redirect_rules(&pipeline.channel, &name("http"), |call| async move {
        let expected = json!({
            "callback_port": 8443,
            "encrypted_exchange_check": true,
            "headers": {"Host": "cdn.example"},
            "killdate": "2031-06-30",
        });
        if serde_json::Value::Object(call.parameters) == expected {
            RedirectRulesReply::success("typed")
        } else {
            RedirectRulesReply::failure("unexpected parameter encoding")
        }
    })
    .expect("serve http");

    let report = pipeline.service.check(PAYLOAD_UUID).await.expect("check");

    assert_eq!(report.render(), "#Redirect Rules Check for http\ntyped\n");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn silent_responder_times_out_without_blocking_others(pipeline: Pipeline) {
    let http = profile(1, "http");
    let dns = profile(2, "dns");
    seed_payload(
        &pipeline.repository,
        vec![
            parameter(&http, "callback_host", "String", "https://c2.example"),
            parameter(&dns, "domains", "Array", r#"["a.example"]"#),
        ],
    )
    .expect("seed payload");

    serve_redirect_rules(&pipeline.channel, &name("http"), |_call| async {
        RedirectRulesReply::success("ok")
    })
    .expect("serve http");
    serve_redirect_rules(&pipeline.channel, &name("dns"), |_call| async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        RedirectRulesReply::success("too late")
    })
    .expect("serve dns");

    let report = pipeline.service.check(PAYLOAD_UUID).await.expect("check");

    assert_eq!(report.failure_count(), 1);
    let dns_outcome = report.outcome_for(&name("dns")).expect("dns outcome");
    assert!(matches!(dns_outcome.status(), OutcomeStatus::Unreachable { .. }));
    assert!(
        report
            .outcome_for(&name("http"))
            .expect("http outcome")
            .is_success()
    );
    assert_eq!(pipeline.channel.pending_calls().expect("pending"), 0);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_checks_share_one_channel(pipeline: Pipeline) {
    let http = profile(1, "http");
    seed_payload(
        &pipeline.repository,
        vec![parameter(&http, "callback_host", "String", "https://c2.example")],
    )
    .expect("seed payload");
    serve_redirect_rules(&pipeline.channel, &name("http"), |call| async move {
        RedirectRulesReply::success(echo_host(&call))
    })
    .expect("serve http");

    let checks = (0..8).map(|_| pipeline.service.check(PAYLOAD_UUID));
    let reports = futures::future::join_all(checks).await;

    for report in reports {
        assert_eq!(
            report.expect("check").render(),
            "#Redirect Rules Check for http\nhttps://c2.example\n"
        );
    }
}
