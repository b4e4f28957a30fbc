// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Resolution of imprecise dates into half-open date ranges.
//!
//! A date string denotes every instant it could mean: `1912` is all of 1912,
//! `1912-04` all of April 1912. A fully specified day or an instant denotes a
//! single point, so its range has zero width.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::time::{
    date_from_utc, decimal_year_from_date, iso_date_from_date, parse_iso_date, YearNumbering,
};

/// The date or instant a caller wants to filter by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateInput {
    /// A `YYYY`, `YYYY-MM` or `YYYY-MM-DD` string, optionally negative.
    Iso(String),
    /// A precise point in time.
    Instant(DateTime<Utc>),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        DateInput::Iso(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        DateInput::Iso(s)
    }
}

impl FromStr for DateInput {
    type Err = Infallible;

    /// Wraps the string; validation happens when the range is resolved.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(DateInput::from(s))
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(date: DateTime<Utc>) -> Self {
        DateInput::Instant(date)
    }
}

impl fmt::Display for DateInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateInput::Iso(s) => write!(f, "{s}"),
            DateInput::Instant(date) => write!(f, "{}", date.to_rfc3339()),
        }
    }
}

/// A half-open interval `[start, end)` in three parallel representations.
///
/// Each field is `None` when the instant it derives from could not be
/// represented; the other fields are unaffected.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_date: Option<DateTime<Utc>>,
    pub start_decimal_year: Option<f64>,
    #[serde(rename = "startISODate")]
    pub start_iso_date: Option<String>,
    pub end_date: Option<DateTime<Utc>>,
    pub end_decimal_year: Option<f64>,
    #[serde(rename = "endISODate")]
    pub end_iso_date: Option<String>,
}

impl DateRange {
    /// Builds a range between two instants.
    ///
    /// Returns `None` if `start` is after `end`.
    pub fn from_dates(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        numbering: YearNumbering,
    ) -> Option<Self> {
        if start > end {
            return None;
        }
        Some(Self::from_endpoints(Some(start), Some(end), numbering))
    }

    /// Returns true if the range is a single point in time.
    pub fn is_instant(&self) -> bool {
        self.start_date.is_some() && self.start_date == self.end_date
    }

    fn from_endpoints(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        numbering: YearNumbering,
    ) -> Self {
        DateRange {
            start_date: start,
            start_decimal_year: start.map(|d| decimal_year_from_date(d, numbering)),
            start_iso_date: start.map(iso_date_from_date),
            end_date: end,
            end_decimal_year: end.map(|d| decimal_year_from_date(d, numbering)),
            end_iso_date: end.map(iso_date_from_date),
        }
    }
}

/// Resolves a `YYYY[-MM[-DD]]` string into the range it denotes.
///
/// - `YYYY` spans the whole year.
/// - `YYYY-MM` spans the whole month.
/// - `YYYY-MM-DD` is the zero-width range at that day's midnight.
///
/// Returns `None` if the string is not a date of that shape.
pub fn date_range_from_iso_date(input: &str, numbering: YearNumbering) -> Option<DateRange> {
    let parts = parse_iso_date(input)?;

    let start_month = parts.month.map_or(0, |m| m - 1);
    let day = parts.day.unwrap_or(1);
    let (end_year, end_month) = match (parts.month, parts.day) {
        (None, _) => (parts.year + 1, 0),
        (Some(month), None) => (parts.year, month),
        (Some(month), Some(_)) => (parts.year, month - 1),
    };

    let start = date_from_utc(parts.year, start_month, day);
    let end = date_from_utc(end_year, end_month, day);
    Some(DateRange::from_endpoints(start, end, numbering))
}

/// Resolves a date string or instant into a range.
///
/// Strings go through [`date_range_from_iso_date`]. An instant is always
/// precise, so it yields a zero-width range at exactly that instant.
pub fn date_range_from_date(input: &DateInput, numbering: YearNumbering) -> Option<DateRange> {
    match input {
        DateInput::Iso(s) => date_range_from_iso_date(s, numbering),
        DateInput::Instant(date) => Some(DateRange::from_endpoints(
            Some(*date),
            Some(*date),
            numbering,
        )),
    }
}

#[cfg(test)]
#[path = "range_tests.rs"]
mod tests;
