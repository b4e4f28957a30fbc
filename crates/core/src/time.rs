// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Conversions between ISO dates, instants and decimal years.
//!
//! All dates are in the proleptic Gregorian calendar at UTC midnight. Years
//! may be negative: `-0044-03-15` is astronomical year −44 (45 BCE).

use std::sync::LazyLock;

use chrono::{DateTime, Datelike, Days, NaiveDate, Timelike, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

const MS_PER_DAY: f64 = 86_400_000.0;

// 1-4 digit year with an optional sign, then optional month and day.
static ISO_DATE_RE: LazyLock<Regex> =
    LazyLock::new(
        || match Regex::new(r"^(-?)([0-9]{1,4})(?:-([0-9]{2}))?(?:-([0-9]{2}))?$") {
            Ok(re) => re,
            Err(_) => unreachable!("static regex pattern"),
        },
    );

/// How negative years are numbered when converting to a decimal year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YearNumbering {
    /// Year 0 exists: `-0001-01-01` is −1.0.
    #[default]
    Astronomical,
    /// There is no year 0: negative years shift down by one, so
    /// `-0001-01-01` is −2.0.
    Historical,
}

/// The components of a `YYYY[-MM[-DD]]` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IsoDateParts {
    pub year: i32,
    /// One-based month, as written.
    pub month: Option<i32>,
    /// One-based day, as written.
    pub day: Option<i32>,
}

/// Split an ISO-like date into its components.
///
/// Returns `None` unless the whole string matches `-?Y{1,4}(-MM(-DD)?)?`.
pub(crate) fn parse_iso_date(input: &str) -> Option<IsoDateParts> {
    let caps = ISO_DATE_RE.captures(input)?;
    let magnitude: i32 = caps.get(2)?.as_str().parse().ok()?;
    let negative = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
    let number = |i: usize| caps.get(i).and_then(|m| m.as_str().parse::<i32>().ok());

    Some(IsoDateParts {
        year: if negative { -magnitude } else { magnitude },
        month: number(3),
        day: number(4),
    })
}

/// Returns the instant at UTC midnight of the given proleptic date.
///
/// The year is taken literally, so `date_from_utc(44, 2, 15)` is in the first
/// century. Out-of-range months and days roll over into neighbouring units:
/// month 12 is January of the next year, day 0 is the last day of the previous
/// month.
///
/// Returns `None` if the date cannot be represented.
pub fn date_from_utc(year: i32, month: i32, day: i32) -> Option<DateTime<Utc>> {
    let year = year.checked_add(month.div_euclid(12))?;
    let month = u32::try_from(month.rem_euclid(12)).ok()? + 1;
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;

    let offset = i64::from(day) - 1;
    let date = if offset >= 0 {
        first.checked_add_days(Days::new(offset.unsigned_abs()))?
    } else {
        first.checked_sub_days(Days::new(offset.unsigned_abs()))?
    };

    date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc())
}

/// Converts a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` string to an instant.
///
/// Unlike strict ISO 8601-1 the year may have one to four digits and a
/// leading `-` for BCE years. A missing month or day means the first one.
///
/// Returns `None` if the string has any other shape.
pub fn date_from_iso_date(input: &str) -> Option<DateTime<Utc>> {
    let parts = parse_iso_date(input)?;
    date_from_utc(
        parts.year,
        parts.month.map_or(0, |m| m - 1),
        parts.day.unwrap_or(1),
    )
}

/// Converts an instant to a decimal year.
///
/// The result is the year plus the fraction of the time elapsed between the
/// surrounding New Year's Days, so January 1 at midnight is exactly the
/// integer year.
pub fn decimal_year_from_date(date: DateTime<Utc>, numbering: YearNumbering) -> f64 {
    let year = date.year();
    let days_in_year = if date.date_naive().leap_year() { 366.0 } else { 365.0 };
    let elapsed_ms = f64::from(date.ordinal0()) * MS_PER_DAY
        + f64::from(date.num_seconds_from_midnight()) * 1000.0
        + f64::from(date.timestamp_subsec_millis());
    let fraction = elapsed_ms / (days_in_year * MS_PER_DAY);

    let whole = match numbering {
        YearNumbering::Historical if year < 0 => year - 1,
        _ => year,
    };
    f64::from(whole) + fraction
}

/// Formats the UTC calendar date of an instant.
///
/// Years 0 through 9999 use `YYYY-MM-DD`; other years use the expanded
/// `±YYYYYY-MM-DD` form.
pub fn iso_date_from_date(date: DateTime<Utc>) -> String {
    let year = date.year();
    if (0..=9999).contains(&year) {
        format!("{year:04}-{:02}-{:02}", date.month(), date.day())
    } else {
        let sign = if year < 0 { '-' } else { '+' };
        format!(
            "{sign}{:06}-{:02}-{:02}",
            year.unsigned_abs(),
            date.month(),
            date.day()
        )
    }
}

#[cfg(test)]
#[path = "time_tests.rs"]
mod tests;
