// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture-backed HTTP interception for API client tests.
//!
//! Build the client under test on a [`HarnessSession`]'s transport. While
//! the session runs, every GET is answered from
//! `<fixture_root>/GET/<url with / as _>.json`; other verbs are stubbed for
//! a scope with [`HarnessSession::stub`], and each stub records the calls it
//! answered.
//!
//! ```no_run
//! use netless::{ApiClient, FixtureLoader, HarnessSession, Method, StubSource};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut session = HarnessSession::new(FixtureLoader::new("tests/responses"));
//! session.setup()?;
//! let client = ApiClient::new("testing", "/", session.transport());
//!
//! let instances = client.get("/linode/instances")?; // GET/linode_instances.json
//!
//! let mut post = session.stub(Method::Post, StubSource::literal(json!({"id": 1})))?;
//! {
//!     let scope = post.enter()?;
//!     client.post("/linode/instances", &json!({"label": "x"}))?;
//!     assert_eq!(scope.last_call_data()?, Some(json!({"label": "x"})));
//! }
//!
//! session.teardown()?;
//! # let _ = instances;
//! # Ok(())
//! # }
//! ```

pub mod check;
pub mod cli;
pub mod client;
pub mod config;
pub mod env;
pub mod error;
pub mod fixture;
pub mod intercept;
pub mod output_diagnostic;
pub mod response;
pub mod session;
pub mod transport;

/// Re-exported capture types from the netless-capture crate.
pub mod capture {
    pub use netless_capture::{CallArgs, CallOutcome, CaptureLog, Headers, InterceptedCall};
}

pub use client::{ApiClient, ClientError};
pub use config::HarnessConfig;
pub use error::HarnessError;
pub use fixture::{FixtureError, FixtureLoader};
pub use intercept::{InterceptTransport, MethodInterceptor, Scope, StubSource};
pub use response::ResponseStub;
pub use session::{HarnessSession, SessionState};
pub use transport::{Method, Request, Response, Transport, TransportError};
