// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Harness configuration from TOML files and the environment.
//!
//! ```toml
//! fixture_root = "tests/responses"
//! status = 200
//! capture_file = "target/netless-calls.jsonl"
//! ```

use crate::fixture::{FixtureLoader, DEFAULT_FIXTURE_ROOT};
use crate::intercept::InterceptTransport;
use crate::response::DEFAULT_STATUS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

fn default_fixture_root() -> PathBuf {
    PathBuf::from(DEFAULT_FIXTURE_ROOT)
}

fn default_status() -> u16 {
    DEFAULT_STATUS
}

/// Settings shared by every session built from it
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HarnessConfig {
    /// Directory holding `<METHOD>/<name>.json` fixtures
    #[serde(default = "default_fixture_root")]
    pub fixture_root: PathBuf,

    /// Status code stubs report (default: 200)
    #[serde(default = "default_status")]
    pub status: u16,

    /// JSONL file mirroring every captured call
    #[serde(default)]
    pub capture_file: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            fixture_root: default_fixture_root(),
            status: DEFAULT_STATUS,
            capture_file: None,
        }
    }
}

impl HarnessConfig {
    /// Load a TOML config file.
    ///
    /// Relative paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&content)?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        config.fixture_root = base_dir.join(&config.fixture_root);
        config.capture_file = config.capture_file.map(|p| base_dir.join(p));
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults with environment overrides applied
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Apply `NETLESS_*` environment variables on top of this config.
    ///
    /// The result is validated like a config file.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(root) = crate::env::fixture_root() {
            self.fixture_root = root;
        }
        if let Some(raw) = crate::env::stub_status() {
            self.status = raw.trim().parse().map_err(|_| {
                ConfigError::Validation(format!(
                    "Invalid {} '{}': expected a status code",
                    crate::env::NETLESS_STUB_STATUS,
                    raw
                ))
            })?;
        }
        if let Some(file) = crate::env::capture_file() {
            self.capture_file = Some(file);
        }
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(100..=599).contains(&self.status) {
            return Err(ConfigError::Validation(format!(
                "Invalid status {}: must be between 100 and 599",
                self.status
            )));
        }
        Ok(())
    }

    pub fn loader(&self) -> FixtureLoader {
        FixtureLoader::new(&self.fixture_root)
    }

    /// Offline intercepting transport built from these settings
    pub fn transport(&self) -> InterceptTransport {
        let mut builder = InterceptTransport::builder(self.loader()).status(self.status);
        if let Some(ref file) = self.capture_file {
            builder = builder.capture_file(file);
        }
        builder.build()
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
