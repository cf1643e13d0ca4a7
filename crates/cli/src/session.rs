// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-test harness lifecycle.
//!
//! A running session answers every GET from the fixture tree, one fixture
//! per URL. Other verbs are stubbed ad hoc with [`HarnessSession::stub`].

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::fixture::FixtureLoader;
use crate::intercept::{InterceptTransport, MethodInterceptor, StubSource};
use crate::transport::{Method, Transport};
use netless_capture::CaptureLog;

/// Lifecycle state of a [`HarnessSession`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Stopped,
    Running,
}

impl SessionState {
    fn as_str(self) -> &'static str {
        match self {
            SessionState::Stopped => "stopped",
            SessionState::Running => "running",
        }
    }
}

#[derive(Debug)]
pub struct HarnessSession {
    transport: InterceptTransport,
    get: Option<MethodInterceptor>,
}

impl HarnessSession {
    /// Session over an offline transport reading fixtures from `loader`
    pub fn new(loader: FixtureLoader) -> Self {
        Self::with_transport(InterceptTransport::new(loader))
    }

    /// Session whose unstubbed requests fall through to `inner`
    pub fn with_inner(loader: FixtureLoader, inner: impl Transport + 'static) -> Self {
        Self::with_transport(InterceptTransport::builder(loader).inner(inner).build())
    }

    /// Session over a preconfigured transport
    pub fn with_transport(transport: InterceptTransport) -> Self {
        Self {
            transport,
            get: None,
        }
    }

    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::with_transport(config.transport())
    }

    pub fn state(&self) -> SessionState {
        if self.get.is_some() {
            SessionState::Running
        } else {
            SessionState::Stopped
        }
    }

    /// Start answering GET requests from fixtures.
    pub fn setup(&mut self) -> Result<(), HarnessError> {
        self.expect_state(SessionState::Stopped, "setup")?;
        let mut get = MethodInterceptor::fixtures(&self.transport, Method::Get)?;
        get.install()?;
        tracing::debug!(
            "session started with fixtures from {}",
            self.transport.loader().root().display()
        );
        self.get = Some(get);
        Ok(())
    }

    /// Stop answering GET requests from fixtures.
    pub fn teardown(&mut self) -> Result<(), HarnessError> {
        self.expect_state(SessionState::Running, "teardown")?;
        if let Some(mut get) = self.get.take() {
            get.restore();
        }
        tracing::debug!("session stopped");
        Ok(())
    }

    /// New, inactive interceptor for `method` on this session's transport.
    ///
    /// Enter it around the block that should see the stub.
    pub fn stub(&self, method: Method, source: StubSource) -> Result<MethodInterceptor, HarnessError> {
        MethodInterceptor::new(&self.transport, method, source)
    }

    /// Transport to build the client under test with
    pub fn transport(&self) -> InterceptTransport {
        self.transport.clone()
    }

    pub fn loader(&self) -> &FixtureLoader {
        self.transport.loader()
    }

    /// The fixture-backed GET interceptor, while running
    pub fn get_interceptor(&self) -> Option<&MethodInterceptor> {
        self.get.as_ref()
    }

    /// GET calls captured since the last `setup()`
    pub fn get_calls(&self) -> Option<&CaptureLog> {
        self.get.as_ref().map(MethodInterceptor::capture_log)
    }

    fn expect_state(&self, expected: SessionState, operation: &'static str) -> Result<(), HarnessError> {
        let state = self.state();
        if state == expected {
            Ok(())
        } else {
            Err(HarnessError::InvalidState {
                operation,
                state: state.as_str(),
            })
        }
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod tests;
