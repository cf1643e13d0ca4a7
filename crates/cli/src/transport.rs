// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The transport seam API clients send requests through.
//!
//! Clients take a [`Transport`] at construction. Production code hands them
//! a real HTTP transport; tests hand them an
//! [`InterceptTransport`](crate::intercept::InterceptTransport) whose verbs
//! can be swapped for stubs.

use crate::fixture::FixtureError;
use netless_capture::{CallArgs, Headers};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

/// HTTP verbs a client may issue
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub const ALL: [Method; 4] = [Method::Get, Method::Post, Method::Put, Method::Delete];

    /// Upper-case wire name, also the fixture directory name
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("unknown HTTP method '{0}' (expected GET, POST, PUT or DELETE)")]
pub struct ParseMethodError(String);

impl FromStr for Method {
    type Err = ParseMethodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseMethodError(s.to_string()))
    }
}

/// One outbound call
#[derive(Clone, Debug, PartialEq)]
pub struct Request {
    pub method: Method,
    pub url: String,
    pub headers: Option<Headers>,
    pub data: Option<Value>,
}

impl Request {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: None,
            data: None,
        }
    }

    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = Some(headers);
        self
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Arguments as recorded by a capture log
    pub fn to_call_args(&self) -> CallArgs {
        CallArgs {
            method: self.method.as_str().to_string(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            data: self.data.clone(),
        }
    }
}

/// Read contract shared by live responses and stubs
pub trait Response: fmt::Debug + Send {
    fn status(&self) -> u16;

    /// Parsed response body
    fn json(&self) -> Value;
}

/// Errors a transport can report
#[derive(Debug, Error)]
pub enum TransportError {
    /// No interception was active and the transport refuses real I/O.
    #[error("refusing network request {method} {url}: no stub is installed for {method}")]
    Offline { method: Method, url: String },

    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("transport failed: {0}")]
    Failed(String),
}

/// Sends requests on behalf of an API client
pub trait Transport: Send + Sync {
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        (**self).send(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        (**self).send(request)
    }
}

/// Transport that never touches the network.
///
/// Every request fails with [`TransportError::Offline`], so a call that
/// escapes interception surfaces as an error rather than real traffic.
#[derive(Clone, Copy, Debug, Default)]
pub struct OfflineTransport;

impl Transport for OfflineTransport {
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        tracing::warn!(
            "request escaped interception: {} {}",
            request.method,
            request.url
        );
        Err(TransportError::Offline {
            method: request.method,
            url: request.url,
        })
    }
}

/// Transport backed by a closure
pub struct FnTransport<F> {
    handler: F,
}

impl<F> FnTransport<F>
where
    F: Fn(Request) -> Result<Box<dyn Response>, TransportError> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

impl<F> Transport for FnTransport<F>
where
    F: Fn(Request) -> Result<Box<dyn Response>, TransportError> + Send + Sync,
{
    fn send(&self, request: Request) -> Result<Box<dyn Response>, TransportError> {
        (self.handler)(request)
    }
}

impl<F> fmt::Debug for FnTransport<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnTransport").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
