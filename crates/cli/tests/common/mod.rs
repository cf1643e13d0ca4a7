// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for harness integration tests.

#![allow(dead_code)]

use netless::{ApiClient, FixtureLoader, HarnessSession, Method, MethodInterceptor, StubSource};
use serde_json::Value;
use std::path::PathBuf;

/// Fixture tree shipped with the tests
pub fn fixture_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/responses")
}

/// A running session plus a client built on its transport.
///
/// Setup happens in [`TestHarness::start`]; teardown happens on drop, so
/// a failing assertion still restores GET.
pub struct TestHarness {
    pub session: HarnessSession,
    pub client: ApiClient,
}

impl TestHarness {
    pub fn start() -> Self {
        let mut session = HarnessSession::new(FixtureLoader::new(fixture_root()));
        session.setup().unwrap();
        let client = ApiClient::new("testing", "/", session.transport());
        Self { session, client }
    }

    /// Inactive POST stub answering with `body`
    pub fn mock_post(&self, body: Value) -> MethodInterceptor {
        self.session
            .stub(Method::Post, StubSource::literal(body))
            .unwrap()
    }
}

impl Drop for TestHarness {
    fn drop(&mut self) {
        let _ = self.session.teardown();
    }
}
