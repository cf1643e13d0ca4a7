// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing for the `netless` fixture tool.

use crate::config::{ConfigError, HarnessConfig};
use crate::transport::Method;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect and validate netless HTTP fixtures
#[derive(Parser, Debug)]
#[command(name = "netless", version, about = "Inspect and validate netless HTTP fixtures")]
pub struct Cli {
    /// Fixture root directory (overrides the config file)
    #[arg(long, global = true, value_name = "DIR", env = "NETLESS_FIXTURE_ROOT")]
    pub fixtures: Option<PathBuf>,

    /// Harness config file (TOML)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log resolution details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the fixture file a request maps to
    Path {
        /// Request URL, e.g. /linode/instances
        url: String,

        /// HTTP method directory to resolve under
        #[arg(short = 'X', long, default_value = "GET")]
        method: Method,
    },

    /// Print the GET fixture for a URL
    Show {
        /// Request URL, e.g. /linode/instances
        url: String,
    },

    /// Parse every fixture and report failures
    Check,
}

impl Cli {
    /// Effective harness config: flags, then environment, then config file.
    pub fn harness_config(&self) -> Result<HarnessConfig, ConfigError> {
        let base = match self.config {
            Some(ref path) => HarnessConfig::load(path)?,
            None => HarnessConfig::default(),
        };
        let mut config = base.with_env_overrides()?;
        if let Some(ref root) = self.fixtures {
            config.fixture_root = root.clone();
        }
        Ok(config)
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
