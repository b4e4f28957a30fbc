// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `mapdate apply`: rewrite a style document for a date.

use std::fs;
use std::io::{self, Read};
use std::path::Path;

use chrono::Utc;
use mapdate_core::{filter_by_date, iso_date_from_date, Options, Style};
use tracing::info;

use crate::error::{Error, Result};

use super::load_options;

pub fn run(
    style: &str,
    date: Option<String>,
    output: Option<&Path>,
    config: Option<&Path>,
) -> Result<()> {
    let options = load_options(config)?;
    let input = read_style(style)?;
    // Defaults to the current UTC day.
    let date = date.unwrap_or_else(|| iso_date_from_date(Utc::now()));

    let rewritten = apply(&input, &date, &options)?;
    match output {
        Some(path) => fs::write(path, rewritten + "\n").map_err(|source| Error::Write {
            path: path.display().to_string(),
            source,
        }),
        None => {
            println!("{}", rewritten);
            Ok(())
        }
    }
}

/// Rewrites the style JSON in `input` and returns it pretty-printed.
pub(crate) fn apply(input: &str, date: &str, options: &Options) -> Result<String> {
    let mut style: Style = serde_json::from_str(input).map_err(Error::InvalidStyle)?;
    let count = filter_by_date(&mut style, date, options)?;
    info!(date, layers = count, "applied date to style");
    Ok(style.to_json_pretty()?)
}

fn read_style(path: &str) -> Result<String> {
    let read_error = |source| Error::Read {
        path: path.to_string(),
        source,
    };
    if path == "-" {
        let mut input = String::new();
        io::stdin()
            .read_to_string(&mut input)
            .map_err(read_error)?;
        Ok(input)
    } else {
        fs::read_to_string(path).map_err(read_error)
    }
}

#[cfg(test)]
#[path = "apply_tests.rs"]
mod tests;
