// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Date constraints for filters in the expression grammar.
//!
//! The range endpoints are bound once in a `let` node and referenced with
//! `var`, so a later rewrite only has to replace the bound values:
//!
//! ```text
//! ["let",
//!   "mapdate__startDecimalYear", 2013.0, "mapdate__startISODate", "2013-01-01",
//!   "mapdate__endDecimalYear", 2014.0, "mapdate__endISODate", "2014-01-01",
//!   ["all",
//!     ["any",
//!       ["all", ["has", "start_decdate"],
//!               ["<", ["get", "start_decdate"], ["var", "mapdate__endDecimalYear"]]],
//!       ["all", ["!", ["has", "start_decdate"]], ["has", "start_date"],
//!               ["<", ["get", "start_date"], ["var", "mapdate__endISODate"]]],
//!       ["all", ["!", ["has", "start_decdate"]], ["!", ["has", "start_date"]]]],
//!     ["any", ...the same for end_decdate / end_date with ">="...],
//!     original]]
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::trace;

use crate::error::{Error, Result};
use crate::range::DateRange;

use super::node::{node_args, present, Bound, RangeField};

const SEPARATOR: &str = "__";

/// Namespace for the variables injected into expression filters.
///
/// Injected names are `<prefix>__<field>`, e.g. `mapdate__startDecimalYear`.
/// The prefix must be an identifier (ASCII letters, digits and single
/// underscores, not starting with a digit) so the `__` separator is
/// unambiguous.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VariablePrefix(String);

impl VariablePrefix {
    /// The prefix used when none is configured.
    pub const DEFAULT: &'static str = "mapdate";

    /// Validates and wraps a prefix.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidVariablePrefix`] if the prefix is empty, is not
    /// an identifier, or contains or ends in the separator.
    pub fn new(prefix: impl Into<String>) -> Result<Self> {
        let prefix = prefix.into();
        let invalid = |reason: &str| {
            Err(Error::InvalidVariablePrefix {
                prefix: prefix.clone(),
                reason: reason.to_string(),
            })
        };

        let Some(first) = prefix.chars().next() else {
            return invalid("must not be empty");
        };
        if first.is_ascii_digit() {
            return invalid("must not start with a digit");
        }
        if !prefix.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return invalid("may only contain ASCII letters, digits and '_'");
        }
        if prefix.contains(SEPARATOR) || prefix.ends_with('_') {
            return invalid("must not contain '__' or end with '_'");
        }
        Ok(VariablePrefix(prefix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Name of the variable bound to `field`.
    pub(crate) fn variable(&self, field: RangeField) -> String {
        format!("{}{SEPARATOR}{}", self.0, field.name())
    }

    fn owns(&self, name: &str) -> bool {
        RangeField::ALL
            .iter()
            .any(|field| self.variable(*field) == name)
    }
}

impl Default for VariablePrefix {
    fn default() -> Self {
        VariablePrefix(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for VariablePrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for VariablePrefix {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        VariablePrefix::new(s)
    }
}

impl From<VariablePrefix> for String {
    fn from(prefix: VariablePrefix) -> Self {
        prefix.0
    }
}

/// A `["let", name, value, ..., body]` node.
#[derive(Debug, Clone)]
struct LetExpression<'a> {
    bindings: Vec<(&'a str, &'a Value)>,
    body: &'a Value,
}

impl<'a> LetExpression<'a> {
    fn parse(value: &'a Value) -> Option<Self> {
        let (body, pairs) = node_args(value, "let")?.split_last()?;
        if pairs.len() % 2 != 0 {
            return None;
        }
        let bindings = pairs
            .chunks_exact(2)
            .map(|pair| match pair {
                [Value::String(name), value] => Some((name.as_str(), value)),
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        Some(LetExpression { bindings, body })
    }

    /// Rebinds the range variables, appending any that are not bound yet.
    fn rebind(&self, range: &DateRange, prefix: &VariablePrefix) -> Value {
        let mut bindings: Vec<(String, Value)> = self
            .bindings
            .iter()
            .map(|(name, value)| ((*name).to_string(), (*value).clone()))
            .collect();

        for (name, value) in range_bindings(range, prefix) {
            match bindings.iter_mut().find(|(bound, _)| *bound == name) {
                Some(slot) => slot.1 = value,
                None => bindings.push((name, value)),
            }
        }
        let_node(bindings, self.body.clone())
    }
}

/// Constrains an expression-grammar filter to features overlapping `range`.
///
/// A `let` node that binds any of the prefixed range variables is treated as
/// a previous result: its bound values are replaced and missing ones are
/// added before the body. Any other filter, including a user-authored `let`,
/// is wrapped. Invalid range fields are not bound.
pub fn constrain_expression_filter_by_date_range(
    filter: Option<&Value>,
    range: &DateRange,
    prefix: &VariablePrefix,
) -> Value {
    let filter = present(filter);

    let previous = filter
        .and_then(LetExpression::parse)
        .filter(|node| node.bindings.iter().any(|(name, _)| prefix.owns(name)));
    if let Some(node) = previous {
        trace!(prefix = %prefix, "rebinding date variables of constrained expression");
        return node.rebind(range, prefix);
    }

    trace!(prefix = %prefix, "wrapping expression in date constraints");
    let mut all = vec![
        Value::from("all"),
        bound_clause(Bound::Start, prefix),
        bound_clause(Bound::End, prefix),
    ];
    all.extend(filter.cloned());
    let_node(range_bindings(range, prefix), Value::Array(all))
}

/// The valid range fields as `(variable, value)` pairs, in binding order.
fn range_bindings(range: &DateRange, prefix: &VariablePrefix) -> Vec<(String, Value)> {
    RangeField::ALL
        .iter()
        .filter_map(|field| Some((prefix.variable(*field), field.value(range)?)))
        .collect()
}

fn let_node(bindings: Vec<(String, Value)>, body: Value) -> Value {
    let mut node = Vec::with_capacity(bindings.len() * 2 + 2);
    node.push(Value::from("let"));
    for (name, value) in bindings {
        node.push(Value::from(name));
        node.push(value);
    }
    node.push(body);
    Value::Array(node)
}

fn bound_clause(bound: Bound, prefix: &VariablePrefix) -> Value {
    let decimal_property = bound.decimal_property();
    let iso_property = bound.iso_property();
    let op = bound.comparison();
    let decimal_var = prefix.variable(bound.decimal_limit());
    let iso_var = prefix.variable(bound.iso_limit());
    json!([
        "any",
        [
            "all",
            ["has", decimal_property],
            [op, ["get", decimal_property], ["var", decimal_var]]
        ],
        [
            "all",
            ["!", ["has", decimal_property]],
            ["has", iso_property],
            [op, ["get", iso_property], ["var", iso_var]]
        ],
        [
            "all",
            ["!", ["has", decimal_property]],
            ["!", ["has", iso_property]]
        ]
    ])
}

#[cfg(test)]
#[path = "expression_tests.rs"]
mod tests;
