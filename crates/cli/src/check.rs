// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Fixture tree validation.

use crate::fixture::{load_json, FixtureError};
use crate::transport::Method;
use std::path::{Path, PathBuf};

/// Result of checking a fixture tree
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of `.json` files examined
    pub checked: usize,
    /// Fixtures that could not be read or parsed
    pub failures: Vec<FixtureError>,
    /// Fixtures outside a `GET`/`POST`/`PUT`/`DELETE` directory
    pub misplaced: Vec<PathBuf>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parse every `*.json` file below `root`.
pub fn check_fixtures(root: &Path) -> Result<CheckReport, glob::PatternError> {
    let pattern = format!(
        "{}/**/*.json",
        glob::Pattern::escape(&root.to_string_lossy())
    );
    let mut report = CheckReport::default();

    for entry in glob::glob(&pattern)? {
        report.checked += 1;
        let path = match entry {
            Ok(path) => path,
            Err(e) => {
                let path = e.path().to_path_buf();
                report.failures.push(FixtureError::Read {
                    path,
                    source: e.into_error(),
                });
                continue;
            }
        };

        if !in_method_dir(root, &path) {
            tracing::debug!("fixture outside a method directory: {}", path.display());
            report.misplaced.push(path.clone());
        }
        if let Err(e) = load_json(&path) {
            report.failures.push(e);
        }
    }

    Ok(report)
}

/// True when `path` is `<root>/<METHOD>/<name>.json`
fn in_method_dir(root: &Path, path: &Path) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };
    let mut components = relative.components();
    let dir = components.next().and_then(|c| c.as_os_str().to_str());
    let is_method = dir.is_some_and(|d| Method::ALL.iter().any(|m| m.as_str() == d));
    is_method && components.count() == 1
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
