// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parse a string that must not be empty or whitespace-only.
fn non_empty_string(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        Err("cannot be empty".to_string())
    } else {
        Ok(s.to_string())
    }
}

#[derive(Parser)]
#[command(name = "mapdate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Show only the map features that existed at a given date")]
#[command(
    long_about = "Rewrites the layer filters of a map style so that only features whose \
    start_date/end_date (or start_decdate/end_decdate) overlap a date are drawn.\n\n\
    Rewriting an already rewritten style replaces the date instead of nesting filters."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Constrain every data-driven layer of a style to a date
    #[command(after_help = "\
Examples:
  mapdate apply style.json --date 1912             All of 1912
  mapdate apply style.json --date 1912-04          April 1912
  mapdate apply style.json --date -0044-03-15      A single day, 45 BCE
  mapdate apply - < style.json > dated.json        Today, reading stdin
  mapdate apply style.json -d 1850 -o dated.json   Write to a file")]
    Apply {
        /// Style JSON file, or '-' for stdin
        #[arg(value_parser = non_empty_string)]
        style: String,

        /// Date as YYYY, YYYY-MM or YYYY-MM-DD (default: today, UTC)
        #[arg(short, long, allow_hyphen_values = true, value_parser = non_empty_string)]
        date: Option<String>,

        /// Write the rewritten style here instead of stdout
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// TOML file with variable_prefix and year_numbering
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print the date range a date resolves to, as JSON
    #[command(after_help = "\
Examples:
  mapdate range 1912          [1912-01-01, 1913-01-01)
  mapdate range 1912-04       [1912-04-01, 1912-05-01)
  mapdate range -0044         All of 45 BCE")]
    Range {
        /// Date as YYYY, YYYY-MM or YYYY-MM-DD
        #[arg(allow_hyphen_values = true)]
        date: String,

        /// TOML file with variable_prefix and year_numbering
        #[arg(short, long, value_name = "PATH")]
        config: Option<PathBuf>,
    },
}

#[cfg(test)]
#[path = "../cli_tests/mod.rs"]
mod tests;
