// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Canned responses.

use crate::transport::Response;
use serde_json::Value;

/// Status code every stub reports unless told otherwise
pub const DEFAULT_STATUS: u16 = 200;

/// Immutable stand-in for a live HTTP response
#[derive(Clone, Debug, PartialEq)]
pub struct ResponseStub {
    status: u16,
    body: Value,
}

impl ResponseStub {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    /// A `200 OK` stub
    pub fn ok(body: Value) -> Self {
        Self::new(DEFAULT_STATUS, body)
    }

    pub fn body(&self) -> &Value {
        &self.body
    }
}

impl Response for ResponseStub {
    fn status(&self) -> u16 {
        self.status
    }

    fn json(&self) -> Value {
        self.body.clone()
    }
}

#[cfg(test)]
#[path = "response_tests.rs"]
mod tests;
