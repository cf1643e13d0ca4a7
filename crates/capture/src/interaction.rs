// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Captured call data types.

use super::duration_serde;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{Duration, SystemTime};

/// Request headers, kept sorted so captures serialize deterministically
pub type Headers = BTreeMap<String, String>;

/// Captured call record
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InterceptedCall {
    /// Sequence number within the owning log
    pub seq: u64,

    /// Wall-clock timestamp
    pub timestamp: SystemTime,

    /// Elapsed time since capture started
    #[serde(rename = "elapsed_us", with = "duration_serde")]
    pub elapsed: Duration,

    /// Arguments the intercepted verb received
    pub args: CallArgs,

    /// What the stub handed back
    pub outcome: CallOutcome,
}

impl InterceptedCall {
    pub fn url(&self) -> &str {
        &self.args.url
    }

    pub fn headers(&self) -> Option<&Headers> {
        self.args.headers.as_ref()
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.args.data.as_ref()
    }
}

/// Captured verb arguments
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CallArgs {
    pub method: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<Headers>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

/// Captured outcome (stubbed response or resolution failure)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CallOutcome {
    Stubbed { status: u16 },
    Failed { message: String },
}

#[cfg(test)]
#[path = "interaction_tests.rs"]
mod tests;
