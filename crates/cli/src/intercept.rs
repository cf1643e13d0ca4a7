// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scoped verb interception.
//!
//! An [`InterceptTransport`] is injected into the client under test. While a
//! [`MethodInterceptor`] is entered, every request for its verb is answered
//! by a [`ResponseStub`] and recorded; everything else goes to the inner
//! transport. Leaving the [`Scope`] (normally or by unwinding) puts the
//! inner transport back in charge of that verb.
//!
//! ```
//! use netless::fixture::FixtureLoader;
//! use netless::intercept::{InterceptTransport, MethodInterceptor, StubSource};
//! use netless::transport::{Method, Request, Transport};
//! use serde_json::json;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = InterceptTransport::new(FixtureLoader::default());
//! let mut post = MethodInterceptor::new(
//!     &transport,
//!     Method::Post,
//!     StubSource::literal(json!({"id": 1})),
//! )?;
//!
//! {
//!     let scope = post.enter()?;
//!     let request = Request::new(Method::Post, "/volumes").with_data(json!({"label": "x"}));
//!     transport.send(request)?;
//!     assert_eq!(scope.last_call_data()?, Some(json!({"label": "x"})));
//! }
//!
//! assert!(!transport.is_intercepted(Method::Post));
//! # Ok(())
//! # }
//! ```

use crate::error::HarnessError;
use crate::fixture::{FixtureError, FixtureLoader};
use crate::response::{ResponseStub, DEFAULT_STATUS};
use crate::transport::{
    Method, OfflineTransport, Request, Response, Transport, TransportError,
};
use netless_capture::{CallOutcome, CaptureLog, Headers, InterceptedCall};
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::HashMap;
use std::ops::Deref;
use std::path::PathBuf;
use std::sync::Arc;

/// Where a stub's body comes from
#[derive(Clone, Debug, PartialEq)]
pub enum StubSource {
    /// Inline JSON body
    Literal(Value),
    /// URL resolved through the GET fixture directory
    Fixture(String),
}

impl StubSource {
    pub fn literal(body: Value) -> Self {
        Self::Literal(body)
    }

    pub fn fixture(url: impl Into<String>) -> Self {
        Self::Fixture(url.into())
    }
}

impl TryFrom<Value> for StubSource {
    type Error = HarnessError;

    /// Objects become literal bodies, strings become fixture URLs.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(_) => Ok(Self::Literal(value)),
            Value::String(url) => Ok(Self::Fixture(url)),
            other => Err(HarnessError::Configuration(format!(
                "stub source must be a JSON object or fixture URL string, got {}",
                other
            ))),
        }
    }
}

/// Produces the stub for one intercepted request
#[derive(Clone, Debug)]
enum Responder {
    Fixed(ResponseStub),
    /// Resolve each request URL through the GET fixture directory
    Fixtures { loader: FixtureLoader, status: u16 },
}

impl Responder {
    fn respond(&self, request: &Request) -> Result<ResponseStub, FixtureError> {
        match self {
            Responder::Fixed(stub) => Ok(stub.clone()),
            Responder::Fixtures { loader, status } => {
                Ok(ResponseStub::new(*status, loader.resolve(&request.url)?))
            }
        }
    }

    fn with_status(self, status: u16) -> Self {
        match self {
            Responder::Fixed(stub) => Responder::Fixed(ResponseStub::new(status, stub.json())),
            Responder::Fixtures { loader, .. } => Responder::Fixtures { loader, status },
        }
    }
}

/// A verb's installed stand-in
#[derive(Debug)]
struct Binding {
    responder: Responder,
    calls: CaptureLog,
}

impl Binding {
    fn handle(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        let args = request.to_call_args();
        match self.responder.respond(&request) {
            Ok(stub) => {
                self.calls
                    .record(args, CallOutcome::Stubbed { status: stub.status() });
                Ok(Box::new(stub))
            }
            Err(e) => {
                self.calls.record(
                    args,
                    CallOutcome::Failed {
                        message: e.to_string(),
                    },
                );
                Err(e.into())
            }
        }
    }
}

struct Shared {
    inner: Box<dyn Transport>,
    loader: FixtureLoader,
    status: u16,
    capture_file: Option<PathBuf>,
    bindings: Mutex<HashMap<Method, Arc<Binding>>>,
}

/// Test-double transport with per-verb, scoped stubs.
///
/// Clones share the same bindings, so a clone handed to a client sees every
/// interceptor entered through another clone.
#[derive(Clone)]
pub struct InterceptTransport {
    shared: Arc<Shared>,
}

impl InterceptTransport {
    /// Transport that refuses any verb without an active stub
    pub fn new(loader: FixtureLoader) -> Self {
        Self::builder(loader).build()
    }

    pub fn builder(loader: FixtureLoader) -> InterceptTransportBuilder {
        InterceptTransportBuilder {
            loader,
            inner: None,
            status: DEFAULT_STATUS,
            capture_file: None,
        }
    }

    pub fn loader(&self) -> &FixtureLoader {
        &self.shared.loader
    }

    /// Status code new stubs report
    pub fn default_status(&self) -> u16 {
        self.shared.status
    }

    pub fn is_intercepted(&self, method: Method) -> bool {
        self.shared.bindings.lock().contains_key(&method)
    }

    fn new_capture_log(&self) -> Result<CaptureLog, HarnessError> {
        match self.shared.capture_file {
            Some(ref path) => {
                CaptureLog::with_file(path).map_err(|source| HarnessError::CaptureFile {
                    path: path.clone(),
                    source,
                })
            }
            None => Ok(CaptureLog::new()),
        }
    }

    fn install(&self, method: Method, binding: &Arc<Binding>) -> Result<(), HarnessError> {
        let mut bindings = self.shared.bindings.lock();
        if bindings.contains_key(&method) {
            return Err(HarnessError::AlreadyIntercepted { method });
        }
        bindings.insert(method, Arc::clone(binding));
        Ok(())
    }

    fn restore(&self, method: Method, binding: &Arc<Binding>) {
        let mut bindings = self.shared.bindings.lock();
        // Only remove our own binding
        if bindings
            .get(&method)
            .is_some_and(|current| Arc::ptr_eq(current, binding))
        {
            bindings.remove(&method);
        }
    }
}

impl Transport for InterceptTransport {
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        let binding = self.shared.bindings.lock().get(&request.method).cloned();
        match binding {
            Some(binding) => {
                tracing::debug!("intercepted {} {}", request.method, request.url);
                binding.handle(request)
            }
            None => self.shared.inner.send(request),
        }
    }
}

impl std::fmt::Debug for InterceptTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut active: Vec<Method> = self.shared.bindings.lock().keys().copied().collect();
        active.sort();
        f.debug_struct("InterceptTransport")
            .field("fixture_root", &self.shared.loader.root())
            .field("intercepted", &active)
            .finish_non_exhaustive()
    }
}

/// Builder for [`InterceptTransport`]
pub struct InterceptTransportBuilder {
    loader: FixtureLoader,
    inner: Option<Box<dyn Transport>>,
    status: u16,
    capture_file: Option<PathBuf>,
}

impl InterceptTransportBuilder {
    /// Transport used for verbs that are not intercepted.
    /// Defaults to [`OfflineTransport`].
    pub fn inner(mut self, inner: impl Transport + 'static) -> Self {
        self.inner = Some(Box::new(inner));
        self
    }

    /// Status code stubs report unless overridden per interceptor
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    /// Mirror every captured call to a JSONL file
    pub fn capture_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.capture_file = Some(path.into());
        self
    }

    pub fn build(self) -> InterceptTransport {
        InterceptTransport {
            shared: Arc::new(Shared {
                inner: self.inner.unwrap_or_else(|| Box::new(OfflineTransport)),
                loader: self.loader,
                status: self.status,
                capture_file: self.capture_file,
                bindings: Mutex::new(HashMap::new()),
            }),
        }
    }
}

/// Replaces one verb on an [`InterceptTransport`] while entered.
#[derive(Debug)]
pub struct MethodInterceptor {
    transport: InterceptTransport,
    method: Method,
    binding: Arc<Binding>,
    active: bool,
}

impl MethodInterceptor {
    /// Create an inactive interceptor answering `method` with a fixed stub.
    ///
    /// A [`StubSource::Fixture`] is loaded now, so a missing or malformed
    /// fixture fails here rather than on the first call.
    pub fn new(
        transport: &InterceptTransport,
        method: Method,
        source: StubSource,
    ) -> Result<Self, HarnessError> {
        let body = match source {
            StubSource::Literal(body) => body,
            StubSource::Fixture(url) => transport.loader().resolve(&url)?,
        };
        let stub = ResponseStub::new(transport.default_status(), body);
        Self::with_responder(transport, method, Responder::Fixed(stub))
    }

    /// Interceptor resolving every request URL through the fixture loader.
    pub(crate) fn fixtures(
        transport: &InterceptTransport,
        method: Method,
    ) -> Result<Self, HarnessError> {
        let responder = Responder::Fixtures {
            loader: transport.loader().clone(),
            status: transport.default_status(),
        };
        Self::with_responder(transport, method, responder)
    }

    fn with_responder(
        transport: &InterceptTransport,
        method: Method,
        responder: Responder,
    ) -> Result<Self, HarnessError> {
        Ok(Self {
            transport: transport.clone(),
            method,
            binding: Arc::new(Binding {
                responder,
                calls: transport.new_capture_log()?,
            }),
            active: false,
        })
    }

    /// Report `status` instead of the transport default.
    pub fn with_status(mut self, status: u16) -> Result<Self, HarnessError> {
        if self.active {
            return Err(HarnessError::InvalidState {
                operation: "change status",
                state: "active",
            });
        }
        self.binding = Arc::new(Binding {
            responder: self.binding.responder.clone().with_status(status),
            calls: self.binding.calls.clone(),
        });
        Ok(self)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Install the stub and return a guard that removes it when dropped.
    pub fn enter(&mut self) -> Result<Scope<'_>, HarnessError> {
        self.install()?;
        Ok(Scope { interceptor: self })
    }

    pub(crate) fn install(&mut self) -> Result<(), HarnessError> {
        if self.active {
            return Err(HarnessError::InvalidState {
                operation: "enter",
                state: "active",
            });
        }
        self.transport.install(self.method, &self.binding)?;
        self.active = true;
        tracing::debug!("installed {} stub", self.method);
        Ok(())
    }

    pub(crate) fn restore(&mut self) {
        if self.active {
            self.transport.restore(self.method, &self.binding);
            self.active = false;
            tracing::debug!("restored {}", self.method);
        }
    }

    /// Every call recorded so far, oldest first
    pub fn calls(&self) -> Vec<InterceptedCall> {
        self.binding.calls.calls()
    }

    pub fn call_count(&self) -> usize {
        self.binding.calls.len()
    }

    pub fn capture_log(&self) -> &CaptureLog {
        &self.binding.calls
    }

    /// Most recent call
    pub fn last_call(&self) -> Result<InterceptedCall, HarnessError> {
        self.binding
            .calls
            .last_call()
            .ok_or(HarnessError::NoCallRecorded {
                method: self.method,
            })
    }

    /// Headers of the most recent call
    pub fn last_call_headers(&self) -> Result<Option<Headers>, HarnessError> {
        Ok(self.last_call()?.args.headers)
    }

    /// Body of the most recent call
    pub fn last_call_data(&self) -> Result<Option<Value>, HarnessError> {
        Ok(self.last_call()?.args.data)
    }
}

impl Drop for MethodInterceptor {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Active interception. Dropping it restores the inner transport's verb.
#[derive(Debug)]
pub struct Scope<'a> {
    interceptor: &'a mut MethodInterceptor,
}

impl Scope<'_> {
    /// Leave the scope explicitly
    pub fn exit(self) {}
}

impl Deref for Scope<'_> {
    type Target = MethodInterceptor;

    fn deref(&self) -> &Self::Target {
        self.interceptor
    }
}

impl Drop for Scope<'_> {
    fn drop(&mut self) {
        self.interceptor.restore();
    }
}

#[cfg(test)]
#[path = "intercept_tests.rs"]
mod tests;
