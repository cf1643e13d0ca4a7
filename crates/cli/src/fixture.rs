// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture file lookup.
//!
//! A request URL maps to a fixture file by stripping every leading `/`,
//! turning the remaining `/` into `_`, and appending `.json`. The file lives
//! under a directory named after the HTTP method:
//!
//! ```text
//! <root>/GET/linode_instances.json   <- GET /linode/instances
//! ```

use crate::transport::Method;
use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default fixture root, relative to the working directory.
pub const DEFAULT_FIXTURE_ROOT: &str = "tests/responses";

/// Errors raised while loading a fixture
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("fixture not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read fixture {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("fixture {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureError {
    /// Path of the fixture that failed
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path } | Self::Read { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

/// Transform a request URL into a fixture file name.
///
/// `"/linode/instances"` and `"linode/instances"` both become
/// `"linode_instances.json"`.
pub fn fixture_name(url: &str) -> String {
    format!("{}.json", url.trim_start_matches('/').replace('/', "_"))
}

/// Resolves request URLs to parsed fixture bodies
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixtureLoader {
    root: PathBuf,
}

impl FixtureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Loader rooted at `NETLESS_FIXTURE_ROOT`, or [`DEFAULT_FIXTURE_ROOT`].
    pub fn from_env() -> Self {
        Self::new(crate::env::fixture_root().unwrap_or_else(|| PathBuf::from(DEFAULT_FIXTURE_ROOT)))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding fixtures for `method`
    pub fn method_dir(&self, method: Method) -> PathBuf {
        self.root.join(method.as_str())
    }

    /// Full fixture path for a request
    pub fn path_for(&self, method: Method, url: &str) -> PathBuf {
        self.method_dir(method).join(fixture_name(url))
    }

    /// Load the GET fixture for `url`.
    pub fn resolve(&self, url: &str) -> Result<Value, FixtureError> {
        self.resolve_for(Method::Get, url)
    }

    /// Load the fixture for `url` under the given method's directory.
    pub fn resolve_for(&self, method: Method, url: &str) -> Result<Value, FixtureError> {
        let path = self.path_for(method, url);
        tracing::debug!("resolving {} {} from {}", method, url, path.display());
        load_json(&path)
    }
}

impl Default for FixtureLoader {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_ROOT)
    }
}

/// Read and parse one fixture file.
pub fn load_json(path: &Path) -> Result<Value, FixtureError> {
    let content = std::fs::read_to_string(path).map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            FixtureError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            FixtureError::Read {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_str(&content).map_err(|source| FixtureError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
