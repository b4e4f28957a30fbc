// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Date constraints for filters in the legacy grammar.
//!
//! The original filter is wrapped as the last conjunct of:
//!
//! ```text
//! ["all",
//!   ["any",
//!     ["all", ["has", "start_decdate"], ["<", "start_decdate", endDecimalYear]],
//!     ["all", ["!has", "start_decdate"], ["has", "start_date"], ["<", "start_date", endISODate]],
//!     ["all", ["!has", "start_decdate"], ["!has", "start_date"]]],
//!   ["any",
//!     ["all", ["has", "end_decdate"], [">=", "end_decdate", startDecimalYear]],
//!     ["all", ["!has", "end_decdate"], ["has", "end_date"], [">=", "end_date", startISODate]],
//!     ["all", ["!has", "end_decdate"], ["!has", "end_date"]]],
//!   original]
//! ```
//!
//! Rewriting a filter of exactly this shape again only replaces the four
//! literals, so repeated rewrites never nest.

use serde_json::{json, Value};
use tracing::trace;

use crate::range::DateRange;

use super::node::{node_args, present, Bound};

/// The literals of one `any` clause of a constrained filter.
#[derive(Debug, Clone, Copy)]
struct BoundClause<'a> {
    decimal: &'a Value,
    iso: &'a Value,
}

impl<'a> BoundClause<'a> {
    fn parse(value: &'a Value, bound: Bound) -> Option<Self> {
        let decimal_property = bound.decimal_property();
        let iso_property = bound.iso_property();

        let [numeric, textual, unbounded] = node_args(value, "any")? else {
            return None;
        };

        let [has_decimal, decimal_cmp] = node_args(numeric, "all")? else {
            return None;
        };
        let [lacks_decimal, has_iso, iso_cmp] = node_args(textual, "all")? else {
            return None;
        };
        let shapes_match = *has_decimal == json!(["has", decimal_property])
            && *lacks_decimal == json!(["!has", decimal_property])
            && *has_iso == json!(["has", iso_property])
            && *unbounded
                == json!(["all", ["!has", decimal_property], ["!has", iso_property]]);
        if !shapes_match {
            return None;
        }

        Some(BoundClause {
            decimal: comparison_literal(decimal_cmp, bound, decimal_property)?,
            iso: comparison_literal(iso_cmp, bound, iso_property)?,
        })
    }
}

/// Returns `literal` from `[op, property, literal]`.
fn comparison_literal<'a>(value: &'a Value, bound: Bound, property: &str) -> Option<&'a Value> {
    match node_args(value, bound.comparison())? {
        [key, literal] if key.as_str() == Some(property) => Some(literal),
        _ => None,
    }
}

/// A legacy filter previously produced by [`constrain_legacy_filter_by_date_range`].
#[derive(Debug, Clone, Copy)]
struct ConstrainedLegacyFilter<'a> {
    start: BoundClause<'a>,
    end: BoundClause<'a>,
    original: Option<&'a Value>,
}

impl<'a> ConstrainedLegacyFilter<'a> {
    fn parse(filter: &'a Value) -> Option<Self> {
        let (start, end, original) = match node_args(filter, "all")? {
            [start, end] => (start, end, None),
            [start, end, original] => (start, end, Some(original)),
            _ => return None,
        };
        Some(ConstrainedLegacyFilter {
            start: BoundClause::parse(start, Bound::Start)?,
            end: BoundClause::parse(end, Bound::End)?,
            original,
        })
    }

    /// Rebuilds the filter with the range's values, keeping any previous
    /// literal whose range field is invalid.
    fn update(&self, range: &DateRange) -> Value {
        let literal = |bound: Bound, clause: &BoundClause<'_>| {
            let decimal = bound.decimal_limit().value(range);
            let iso = bound.iso_limit().value(range);
            bound_clause(
                bound,
                decimal.unwrap_or_else(|| clause.decimal.clone()),
                iso.unwrap_or_else(|| clause.iso.clone()),
            )
        };
        conjunction(
            literal(Bound::Start, &self.start),
            literal(Bound::End, &self.end),
            self.original,
        )
    }
}

/// Constrains a legacy-grammar filter to features overlapping `range`.
///
/// A filter previously returned by this function has its date literals
/// replaced and its original conjunct carried over unchanged; any other filter
/// is wrapped. An invalid range field is written as `null` when building a
/// fresh filter.
pub fn constrain_legacy_filter_by_date_range(filter: Option<&Value>, range: &DateRange) -> Value {
    let filter = present(filter);

    if let Some(constrained) = filter.and_then(ConstrainedLegacyFilter::parse) {
        trace!("replacing date literals of constrained legacy filter");
        return constrained.update(range);
    }

    trace!("wrapping legacy filter in date constraints");
    let clause = |bound: Bound| {
        bound_clause(
            bound,
            bound.decimal_limit().value(range).unwrap_or(Value::Null),
            bound.iso_limit().value(range).unwrap_or(Value::Null),
        )
    };
    conjunction(clause(Bound::Start), clause(Bound::End), filter)
}

fn bound_clause(bound: Bound, decimal: Value, iso: Value) -> Value {
    let decimal_property = bound.decimal_property();
    let iso_property = bound.iso_property();
    let op = bound.comparison();
    json!([
        "any",
        ["all", ["has", decimal_property], [op, decimal_property, decimal]],
        [
            "all",
            ["!has", decimal_property],
            ["has", iso_property],
            [op, iso_property, iso]
        ],
        ["all", ["!has", decimal_property], ["!has", iso_property]]
    ])
}

fn conjunction(start: Value, end: Value, original: Option<&Value>) -> Value {
    let mut all = vec![Value::from("all"), start, end];
    all.extend(original.cloned());
    Value::Array(all)
}

#[cfg(test)]
#[path = "legacy_tests.rs"]
mod tests;
