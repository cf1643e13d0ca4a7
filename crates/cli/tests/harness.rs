// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! End-to-end tests driving an API client through a harness session.

mod common;

use common::{fixture_root, TestHarness};
use netless::capture::CallOutcome;
use netless::{
    ApiClient, ClientError, FixtureError, FixtureLoader, HarnessError, HarnessSession, Method,
    StubSource, TransportError,
};
use serde_json::json;
use std::panic::{catch_unwind, AssertUnwindSafe};

// =============================================================================
// GET auto-resolution
// =============================================================================

#[test]
fn get_returns_fixture_for_url() {
    let harness = TestHarness::start();

    let body = harness.client.get("/foo/bar").unwrap();

    assert_eq!(body, json!({"foo": "bar", "nested": {"count": 2}}));
}

#[test]
fn each_get_url_resolves_independently() {
    let harness = TestHarness::start();

    let instances = harness.client.get("/linode/instances").unwrap();
    let instance = harness.client.get("/linode/instances/123").unwrap();
    let regions = harness.client.get("regions").unwrap();

    assert_eq!(instances["results"], 2);
    assert_eq!(instance["label"], "linode123");
    assert_eq!(regions[1]["id"], "eu-west");
}

#[test]
fn get_resolution_is_repeatable() {
    let harness = TestHarness::start();

    let first = harness.client.get("/account").unwrap();
    let second = harness.client.get("//account").unwrap();

    assert_eq!(first, second);
}

#[test]
fn get_calls_are_captured_with_headers() {
    let harness = TestHarness::start();

    harness.client.get("/account").unwrap();

    let get = harness.session.get_interceptor().unwrap();
    let headers = get.last_call_headers().unwrap().unwrap();
    assert_eq!(headers["Authorization"], "Bearer testing");
    assert_eq!(get.last_call_data().unwrap(), None);
}

#[test]
fn missing_get_fixture_fails_with_path() {
    let harness = TestHarness::start();

    let err = harness.client.get("/volumes").unwrap_err();

    match err {
        ClientError::Transport(TransportError::Fixture(FixtureError::NotFound { path })) => {
            assert_eq!(path, fixture_root().join("GET").join("volumes.json"));
        }
        other => panic!("Expected missing fixture, got {:?}", other),
    }
    let failures = harness
        .session
        .get_interceptor()
        .unwrap()
        .capture_log()
        .failures();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0].outcome, CallOutcome::Failed { .. }));
}

#[test]
fn teardown_stops_serving_fixtures() {
    let mut session = HarnessSession::new(FixtureLoader::new(fixture_root()));
    session.setup().unwrap();
    let client = ApiClient::new("testing", "/", session.transport());
    assert!(client.get("/foo/bar").is_ok());

    session.teardown().unwrap();

    assert!(matches!(
        client.get("/foo/bar"),
        Err(ClientError::Transport(TransportError::Offline { .. }))
    ));
}

// =============================================================================
// Scoped stubs
// =============================================================================

#[test]
fn post_stub_captures_body() {
    let harness = TestHarness::start();
    let mut post = harness.mock_post(json!({"id": 999, "label": "x"}));

    let scope = post.enter().unwrap();
    let created = harness
        .client
        .post("/linode/instances", &json!({"label": "x"}))
        .unwrap();

    assert_eq!(created["id"], 999);
    assert_eq!(scope.last_call_data().unwrap(), Some(json!({"label": "x"})));
    assert_eq!(scope.last_call().unwrap().url(), "/linode/instances");
}

#[test]
fn post_stub_before_any_call_has_nothing_recorded() {
    let harness = TestHarness::start();
    let mut post = harness.mock_post(json!({}));

    let scope = post.enter().unwrap();

    assert!(matches!(
        scope.last_call_data(),
        Err(HarnessError::NoCallRecorded {
            method: Method::Post
        })
    ));
}

#[test]
fn post_outside_scope_is_refused() {
    let harness = TestHarness::start();
    let mut post = harness.mock_post(json!({"id": 1}));

    {
        let _scope = post.enter().unwrap();
        harness.client.post("/volumes", &json!({})).unwrap();
    }

    assert!(matches!(
        harness.client.post("/volumes", &json!({})),
        Err(ClientError::Transport(TransportError::Offline { .. }))
    ));
}

#[test]
fn failing_assertion_inside_scope_restores_verb() {
    let harness = TestHarness::start();
    let mut put = harness
        .session
        .stub(Method::Put, StubSource::literal(json!({"ok": true})))
        .unwrap();

    let result = catch_unwind(AssertUnwindSafe(|| {
        let _scope = put.enter().unwrap();
        let body = harness.client.put("/volumes/1", &json!({"size": 20})).unwrap();
        assert_eq!(body, json!({"ok": false}), "deliberate failure");
    }));

    assert!(result.is_err());
    assert!(!harness.session.transport().is_intercepted(Method::Put));
    assert!(matches!(
        harness.client.put("/volumes/1", &json!({})),
        Err(ClientError::Transport(TransportError::Offline { .. }))
    ));
    // GET is still served by the session
    assert!(harness.client.get("/account").is_ok());
}

#[test]
fn nested_stubs_for_same_verb_are_rejected() {
    let harness = TestHarness::start();
    let mut first = harness.mock_post(json!({"n": 1}));
    let mut second = harness.mock_post(json!({"n": 2}));

    let _outer = first.enter().unwrap();

    assert!(matches!(
        second.enter(),
        Err(HarnessError::AlreadyIntercepted {
            method: Method::Post
        })
    ));
}

#[test]
fn fixture_backed_stub_for_delete() {
    let harness = TestHarness::start();
    let mut delete = harness
        .session
        .stub(Method::Delete, StubSource::fixture("/linode/instances/123"))
        .unwrap()
        .with_status(200)
        .unwrap();

    let _scope = delete.enter().unwrap();
    let body = harness.client.delete("/linode/instances/123").unwrap();

    assert_eq!(body["id"], 123);
}

#[test]
fn error_status_stub_surfaces_as_api_error() {
    let harness = TestHarness::start();
    let mut post = harness
        .mock_post(json!({"errors": [{"reason": "label taken"}]}))
        .with_status(400)
        .unwrap();

    let _scope = post.enter().unwrap();
    let err = harness
        .client
        .post("/linode/instances", &json!({"label": "dup"}))
        .unwrap_err();

    match err {
        ClientError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body["errors"][0]["reason"], "label taken");
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[test]
fn stub_source_from_dynamic_json() {
    let harness = TestHarness::start();

    assert!(matches!(
        StubSource::try_from(json!(42)),
        Err(HarnessError::Configuration(_))
    ));

    let source = StubSource::try_from(json!("/account")).unwrap();
    let mut post = harness.session.stub(Method::Post, source).unwrap();
    let _scope = post.enter().unwrap();

    assert_eq!(
        harness.client.post("/account", &json!({})).unwrap()["company"],
        "Example Org"
    );
}

// =============================================================================
// Lifecycle misuse
// =============================================================================

#[test]
fn lifecycle_misuse_is_reported() {
    let mut session = HarnessSession::new(FixtureLoader::new(fixture_root()));

    assert!(matches!(
        session.teardown(),
        Err(HarnessError::InvalidState { .. })
    ));
    session.setup().unwrap();
    assert!(matches!(
        session.setup(),
        Err(HarnessError::InvalidState { .. })
    ));
}
