// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! netless fixture tool entry point.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use netless::check::check_fixtures;
use netless::cli::{Cli, Command};
use netless::output_diagnostic::{print_error, print_warning};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "netless=debug" } else { "warn" };
    let filter = netless::env::log_filter()
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = cli.harness_config()?;
    let loader = config.loader();

    match cli.command {
        Command::Path { ref url, method } => {
            println!("{}", loader.path_for(method, url).display());
        }
        Command::Show { ref url } => {
            let body = loader.resolve(url)?;
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        Command::Check => {
            let report = check_fixtures(loader.root())?;
            for path in &report.misplaced {
                print_warning(format_args!(
                    "{} is not inside a GET, POST, PUT or DELETE directory",
                    path.display()
                ));
            }
            for failure in &report.failures {
                print_error(failure);
            }
            println!(
                "checked {} fixtures, {} failed",
                report.checked,
                report.failures.len()
            );
            if !report.is_ok() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
