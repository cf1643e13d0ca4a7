// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal JSON API client driven through an injected transport.
//!
//! This is the shape of client the harness is built to test: it never opens
//! a connection itself and sends every call through its [`Transport`].

use crate::transport::{Method, Request, Transport, TransportError};
use netless_capture::Headers;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

pub const USER_AGENT: &str = concat!("netless/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: Value },
}

pub struct ApiClient {
    token: String,
    base_url: String,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(
        token: impl Into<String>,
        base_url: impl Into<String>,
        transport: impl Transport + 'static,
    ) -> Self {
        Self {
            token: token.into(),
            base_url: base_url.into(),
            transport: Arc::new(transport),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Join the base URL and `path` with exactly one `/`
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn headers(&self) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization".to_string(), format!("Bearer {}", self.token));
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("User-Agent".to_string(), USER_AGENT.to_string());
        headers
    }

    pub fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::Get, path, None)
    }

    pub fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.send(Method::Post, path, Some(body))
    }

    pub fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.send(Method::Put, path, Some(body))
    }

    pub fn delete(&self, path: &str) -> Result<Value, ClientError> {
        self.send(Method::Delete, path, None)
    }

    fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ClientError> {
        let mut request = Request::new(method, self.url(path)).with_headers(self.headers());
        if let Some(body) = body {
            request = request.with_data(body.clone());
        }

        let response = self.transport.send(request)?;
        let status = response.status();
        let body = response.json();
        if status >= 400 {
            return Err(ClientError::Api { status, body });
        }
        Ok(body)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
