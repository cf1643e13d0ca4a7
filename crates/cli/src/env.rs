// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by netless are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

/// Generated env var name constants.
mod names {
    include!(concat!(env!("OUT_DIR"), "/env_names.rs"));
}

pub use names::*;

use std::path::PathBuf;

/// `NETLESS_FIXTURE_ROOT`: Directory holding `<METHOD>/<name>.json` fixtures.
pub fn fixture_root() -> Option<PathBuf> {
    non_empty(names::NETLESS_FIXTURE_ROOT).map(PathBuf::from)
}

/// `NETLESS_CAPTURE_FILE`: JSONL file mirroring every captured call.
pub fn capture_file() -> Option<PathBuf> {
    non_empty(names::NETLESS_CAPTURE_FILE).map(PathBuf::from)
}

/// `NETLESS_STUB_STATUS`: Status code reported by stubs. Default 200.
///
/// Returned unparsed; [`HarnessConfig`](crate::config::HarnessConfig)
/// rejects values that are not a valid status.
pub fn stub_status() -> Option<String> {
    non_empty(names::NETLESS_STUB_STATUS)
}

/// `NETLESS_LOG`: Log filter directive for the `netless` binary.
pub fn log_filter() -> Option<String> {
    non_empty(names::NETLESS_LOG)
}

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
