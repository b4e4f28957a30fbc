// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Best-effort detection of the legacy filter grammar.
//!
//! The legacy grammar (`["==", "class", "primary"]`) and the expression
//! grammar (`["==", ["get", "class"], "primary"]`) share operators, so some
//! filters are valid in both. Detection only proves a filter legacy; anything
//! inconclusive is assumed to be an expression.

use serde_json::Value;

use super::node::split_node;

/// Pseudo-properties that only exist in the legacy grammar.
const RESERVED_KEYS: [&str; 2] = ["$id", "$type"];

/// Returns true if `filter` is definitely written in the legacy grammar.
///
/// # Examples
///
/// ```
/// use mapdate_core::filter::is_legacy_filter;
/// use serde_json::json;
///
/// assert!(is_legacy_filter(&json!(["!has", "end_date"])));
/// assert!(is_legacy_filter(&json!(["in", "class", "primary", "secondary"])));
/// assert!(!is_legacy_filter(&json!(["in", "class", ["primary"]])));
/// assert!(!is_legacy_filter(&json!(["coalesce", false, true])));
/// ```
pub fn is_legacy_filter(filter: &Value) -> bool {
    let Some((op, args)) = split_node(filter) else {
        return false;
    };
    if args.is_empty() {
        return false;
    }

    match op {
        // No expression equivalent
        "!has" | "!in" | "none" => true,
        "has" => args.first().is_some_and(is_reserved_key),
        "in" => is_legacy_in(args),
        "==" | "!=" | ">" | ">=" | "<" | "<=" => is_legacy_comparison(args),
        "all" | "any" => args.iter().any(is_legacy_filter),
        _ => false,
    }
}

fn is_reserved_key(key: &Value) -> bool {
    key.as_str().is_some_and(|k| RESERVED_KEYS.contains(&k))
}

fn is_legacy_in(args: &[Value]) -> bool {
    match args {
        // The expression grammar takes the candidates as one array argument.
        [_, _, _, ..] => true,
        [key, value] => {
            is_reserved_key(key)
                || value.is_number()
                || value.is_boolean()
                || (key.is_string() && value.is_string())
        }
        [key] => is_reserved_key(key),
        [] => false,
    }
}

/// A bare property name compared with a literal.
fn is_legacy_comparison(args: &[Value]) -> bool {
    match args {
        [Value::String(_), rest @ ..] => !matches!(rest.first(), Some(Value::Array(_))),
        _ => false,
    }
}

#[cfg(test)]
#[path = "classify_tests.rs"]
mod tests;
