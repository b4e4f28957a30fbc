// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::Path;

use mapdate_core::{date_range_from_iso_date, DateRange, Options};

use crate::error::{Error, Result};

use super::load_options;

pub fn run(date: &str, config: Option<&Path>) -> Result<()> {
    let options = load_options(config)?;
    let range = resolve(date, &options)?;
    println!("{}", serde_json::to_string_pretty(&range)?);
    Ok(())
}

pub(crate) fn resolve(date: &str, options: &Options) -> Result<DateRange> {
    date_range_from_iso_date(date, options.year_numbering)
        .ok_or_else(|| Error::Core(mapdate_core::Error::InvalidDate(date.to_string())))
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
