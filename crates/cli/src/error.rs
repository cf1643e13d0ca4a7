// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness error taxonomy.

use crate::fixture::FixtureError;
use crate::transport::Method;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by interceptors and sessions
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Fixture(#[from] FixtureError),

    #[error("invalid stub configuration: {0}")]
    Configuration(String),

    #[error("no {method} call has been recorded")]
    NoCallRecorded { method: Method },

    #[error("{method} is already intercepted on this transport")]
    AlreadyIntercepted { method: Method },

    #[error("cannot {operation}: harness is {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    #[error("failed to open capture file {}: {source}", path.display())]
    CaptureFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
