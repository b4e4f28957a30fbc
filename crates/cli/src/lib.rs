// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mapdate - apply a date to the layer filters of a map style.
//!
//! The heavy lifting lives in [`mapdate_core`]; this crate parses arguments,
//! reads and writes style documents and reports errors.

mod cli;
mod commands;

pub mod error;

pub use cli::{Cli, Command};
pub use error::{Error, Result};

/// Installs the stderr log subscriber.
///
/// `RUST_LOG` selects the level; the default only shows warnings so that
/// stdout stays clean for piping.
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Runs a parsed command.
pub fn run(command: Command) -> Result<()> {
    match command {
        Command::Apply {
            style,
            date,
            output,
            config,
        } => commands::apply::run(&style, date, output.as_deref(), config.as_deref()),
        Command::Range { date, config } => commands::range::run(&date, config.as_deref()),
    }
}
