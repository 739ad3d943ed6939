//! # roster-prep CLI entry point
//!
//! Parses command-line arguments, loads the configuration and dispatches to
//! the subcommand handlers.

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use roster_prep::Config;
use roster_prep::cli::{Cli, init_tracing, run};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    tracing::debug!("roster-prep v{} starting", env!("CARGO_PKG_VERSION"));

    let result = Config::load(cli.config.as_deref())
        .context("loading configuration")
        .and_then(|config| run(&cli.command, &config));

    match result {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        },
    }
}
