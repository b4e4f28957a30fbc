// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Date constraints for map layer filters.
//!
//! Layer filters come in two grammars that share most operators:
//!
//! - Legacy: `["==", "class", "primary"]`, properties named by bare strings
//! - Expression: `["==", ["get", "class"], "primary"]`
//!
//! A constrained filter keeps features whose `[start, end)` lifespan, read
//! from the `start_decdate`/`end_decdate` properties or the
//! `start_date`/`end_date` ISO fallbacks, overlaps the selected range. A
//! missing bound is unbounded on that side.
//!
//! # Examples
//!
//! ```
//! use mapdate_core::filter::constrain_filter_by_date_range;
//! use mapdate_core::{date_range_from_iso_date, Options};
//! use serde_json::json;
//!
//! let options = Options::default();
//! let range = date_range_from_iso_date("1912", options.year_numbering).unwrap();
//! let once = constrain_filter_by_date_range(Some(&json!(["has", "building"])), &range, &options);
//! let twice = constrain_filter_by_date_range(Some(&once), &range, &options);
//! assert_eq!(once, twice);
//! ```

mod classify;
mod expression;
mod legacy;
mod node;

pub use classify::is_legacy_filter;
pub use expression::{constrain_expression_filter_by_date_range, VariablePrefix};
pub use legacy::constrain_legacy_filter_by_date_range;

use serde_json::Value;

use crate::config::Options;
use crate::range::DateRange;

/// The grammar a filter is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Legacy,
    Expression,
}

impl Dialect {
    /// Classifies `filter`; a missing filter is an expression.
    pub fn of(filter: Option<&Value>) -> Self {
        match filter {
            Some(f) if is_legacy_filter(f) => Dialect::Legacy,
            _ => Dialect::Expression,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Dialect::Legacy => "legacy",
            Dialect::Expression => "expression",
        }
    }
}

/// Constrains `filter` to `range` using the rewriter for its grammar.
pub fn constrain_filter_by_date_range(
    filter: Option<&Value>,
    range: &DateRange,
    options: &Options,
) -> Value {
    match Dialect::of(filter) {
        Dialect::Legacy => constrain_legacy_filter_by_date_range(filter, range),
        Dialect::Expression => {
            constrain_expression_filter_by_date_range(filter, range, &options.variable_prefix)
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
