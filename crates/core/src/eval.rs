// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Evaluation of layer filters against individual features.
//!
//! This covers the operators the rewriters emit plus the common comparison,
//! membership and control-flow operators of both grammars. It is meant for
//! previewing which features a constrained filter keeps, not as a complete
//! renderer implementation.

use std::cmp::Ordering;

use serde_json::{Map, Value};

use crate::error::{Error, Result};
use crate::filter::Dialect;

static NULL: Value = Value::Null;

/// A map feature as seen by a filter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Feature {
    pub id: Option<Value>,
    /// `Point`, `LineString` or `Polygon`.
    pub geometry_type: Option<String>,
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Creates a feature with no id or geometry type.
    pub fn with_properties(properties: Map<String, Value>) -> Self {
        Feature {
            properties,
            ..Feature::default()
        }
    }
}

/// Returns true if `feature` passes `filter`.
///
/// A `null` filter passes every feature. Expression filters pass only when
/// they evaluate to `true`.
///
/// # Errors
///
/// Returns [`Error::UnsupportedOperator`] for operators outside the supported
/// subset and [`Error::UnboundVariable`] for a `var` with no enclosing `let`.
pub fn evaluate(filter: &Value, feature: &Feature) -> Result<bool> {
    if filter.is_null() {
        return Ok(true);
    }
    match Dialect::of(Some(filter)) {
        Dialect::Legacy => legacy(filter, feature),
        Dialect::Expression => {
            let result = Evaluator { feature }.eval(filter, &Scope::root())?;
            Ok(is_true(&result))
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Legacy grammar
// ─────────────────────────────────────────────────────────────────────────────

fn legacy(filter: &Value, feature: &Feature) -> Result<bool> {
    let (op, args) = operator(filter)?;
    match op {
        "all" => all_of(args, |f| legacy(f, feature)),
        "any" => any_of(args, |f| legacy(f, feature)),
        "none" => any_of(args, |f| legacy(f, feature)).map(|any| !any),
        "has" => Ok(legacy_lookup(args, feature).is_some()),
        "!has" => Ok(legacy_lookup(args, feature).is_none()),
        "in" => Ok(legacy_in(args, feature)),
        "!in" => Ok(!legacy_in(args, feature)),
        "==" | "!=" | "<" | "<=" | ">" | ">=" => {
            let actual = legacy_lookup(args, feature);
            let expected = args.get(1).unwrap_or(&NULL);
            let matched = match (op, actual) {
                ("!=", None) => true,
                (_, None) => false,
                (_, Some(actual)) => compare(op, &actual, expected),
            };
            Ok(matched)
        }
        _ => Err(Error::UnsupportedOperator(op.to_string())),
    }
}

/// Resolves a bare key, including the `$type` and `$id` pseudo-properties.
fn legacy_lookup(args: &[Value], feature: &Feature) -> Option<Value> {
    match args.first()?.as_str()? {
        "$type" => feature.geometry_type.clone().map(Value::from),
        "$id" => feature.id.clone(),
        key => feature.properties.get(key).cloned(),
    }
}

fn legacy_in(args: &[Value], feature: &Feature) -> bool {
    let Some(actual) = legacy_lookup(args, feature) else {
        return false;
    };
    args.iter()
        .skip(1)
        .any(|candidate| compare("==", &actual, candidate))
}

// ─────────────────────────────────────────────────────────────────────────────
// Expression grammar
// ─────────────────────────────────────────────────────────────────────────────

/// Variables bound by enclosing `let` nodes, innermost first.
struct Scope<'a> {
    bindings: Vec<(&'a str, Value)>,
    parent: Option<&'a Scope<'a>>,
}

impl<'a> Scope<'a> {
    fn root() -> Self {
        Scope {
            bindings: Vec::new(),
            parent: None,
        }
    }

    fn lookup(&self, name: &str) -> Option<&Value> {
        self.bindings
            .iter()
            .rev()
            .find(|(bound, _)| *bound == name)
            .map(|(_, value)| value)
            .or_else(|| self.parent.and_then(|parent| parent.lookup(name)))
    }
}

struct Evaluator<'f> {
    feature: &'f Feature,
}

impl Evaluator<'_> {
    fn eval(&self, expr: &Value, scope: &Scope<'_>) -> Result<Value> {
        if !expr.is_array() {
            return match expr {
                Value::Object(_) => Err(Error::UnsupportedOperator(expr.to_string())),
                scalar => Ok(scalar.clone()),
            };
        }
        let (op, args) = operator(expr)?;

        match op {
            "literal" => Ok(args.first().cloned().unwrap_or(Value::Null)),
            "get" => {
                let key = self.eval_arg(args, 0, scope)?;
                let value = key
                    .as_str()
                    .and_then(|key| self.feature.properties.get(key))
                    .cloned();
                Ok(value.unwrap_or(Value::Null))
            }
            "has" => {
                let key = self.eval_arg(args, 0, scope)?;
                let found = key
                    .as_str()
                    .is_some_and(|key| self.feature.properties.contains_key(key));
                Ok(Value::Bool(found))
            }
            "id" => Ok(self.feature.id.clone().unwrap_or(Value::Null)),
            "geometry-type" => Ok(self
                .feature
                .geometry_type
                .clone()
                .map_or(Value::Null, Value::from)),
            "!" => Ok(Value::Bool(!is_true(&self.eval_arg(args, 0, scope)?))),
            "all" => all_of(args, |a| Ok(is_true(&self.eval(a, scope)?))).map(Value::Bool),
            "any" => any_of(args, |a| Ok(is_true(&self.eval(a, scope)?))).map(Value::Bool),
            "==" | "!=" | "<" | "<=" | ">" | ">=" => {
                let lhs = self.eval_arg(args, 0, scope)?;
                let rhs = self.eval_arg(args, 1, scope)?;
                Ok(Value::Bool(compare(op, &lhs, &rhs)))
            }
            "in" => {
                let needle = self.eval_arg(args, 0, scope)?;
                let found = match self.eval_arg(args, 1, scope)? {
                    Value::Array(haystack) => haystack.iter().any(|v| compare("==", &needle, v)),
                    Value::String(haystack) => {
                        needle.as_str().is_some_and(|n| haystack.contains(n))
                    }
                    _ => false,
                };
                Ok(Value::Bool(found))
            }
            "coalesce" => {
                for arg in args {
                    let value = self.eval(arg, scope)?;
                    if !value.is_null() {
                        return Ok(value);
                    }
                }
                Ok(Value::Null)
            }
            "case" => {
                let (fallback, branches) = args.split_last().unwrap_or((&NULL, &[]));
                for branch in branches.chunks_exact(2) {
                    if let [condition, output] = branch {
                        if is_true(&self.eval(condition, scope)?) {
                            return self.eval(output, scope);
                        }
                    }
                }
                self.eval(fallback, scope)
            }
            "match" => {
                let input = self.eval_arg(args, 0, scope)?;
                let rest = args.get(1..).unwrap_or_default();
                let (fallback, branches) = rest.split_last().unwrap_or((&NULL, &[]));
                for branch in branches.chunks_exact(2) {
                    let [labels, output] = branch else {
                        continue;
                    };
                    let hit = match labels {
                        Value::Array(labels) => labels.iter().any(|l| compare("==", &input, l)),
                        label => compare("==", &input, label),
                    };
                    if hit {
                        return self.eval(output, scope);
                    }
                }
                self.eval(fallback, scope)
            }
            "to-boolean" => Ok(Value::Bool(truthy(&self.eval_arg(args, 0, scope)?))),
            "let" => {
                let (body, pairs) = args.split_last().unwrap_or((&NULL, &[]));
                let mut bindings = Vec::with_capacity(pairs.len() / 2);
                for pair in pairs.chunks(2) {
                    let [Value::String(name), value] = pair else {
                        return Err(Error::UnsupportedOperator(expr.to_string()));
                    };
                    bindings.push((name.as_str(), self.eval(value, scope)?));
                }
                let inner = Scope {
                    bindings,
                    parent: Some(scope),
                };
                self.eval(body, &inner)
            }
            "var" => {
                let name = args.first().and_then(Value::as_str).unwrap_or_default();
                scope
                    .lookup(name)
                    .cloned()
                    .ok_or_else(|| Error::UnboundVariable(name.to_string()))
            }
            _ => Err(Error::UnsupportedOperator(op.to_string())),
        }
    }

    fn eval_arg(&self, args: &[Value], index: usize, scope: &Scope<'_>) -> Result<Value> {
        match args.get(index) {
            Some(arg) => self.eval(arg, scope),
            None => Ok(Value::Null),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Shared helpers
// ─────────────────────────────────────────────────────────────────────────────

fn operator(node: &Value) -> Result<(&str, &[Value])> {
    match node.as_array().and_then(|items| items.split_first()) {
        Some((Value::String(op), args)) => Ok((op.as_str(), args)),
        _ => Err(Error::UnsupportedOperator(node.to_string())),
    }
}

fn all_of(args: &[Value], mut pred: impl FnMut(&Value) -> Result<bool>) -> Result<bool> {
    for arg in args {
        if !pred(arg)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn any_of(args: &[Value], mut pred: impl FnMut(&Value) -> Result<bool>) -> Result<bool> {
    for arg in args {
        if pred(arg)? {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Type-strict comparison: values of different types are never equal or
/// ordered, and only numbers and strings are ordered.
fn compare(op: &str, lhs: &Value, rhs: &Value) -> bool {
    let ordering = match (lhs, rhs) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a.partial_cmp(&b),
            _ => None,
        },
        (Value::String(a), Value::String(b)) => Some(a.cmp(b)),
        (Value::Bool(a), Value::Bool(b)) if matches!(op, "==" | "!=") => Some(a.cmp(b)),
        (Value::Null, Value::Null) if matches!(op, "==" | "!=") => Some(Ordering::Equal),
        _ => None,
    };
    match (op, ordering) {
        ("!=", ordering) => ordering != Some(Ordering::Equal),
        (_, None) => false,
        ("==", Some(o)) => o == Ordering::Equal,
        ("<", Some(o)) => o == Ordering::Less,
        ("<=", Some(o)) => o != Ordering::Greater,
        (">", Some(o)) => o == Ordering::Greater,
        (">=", Some(o)) => o != Ordering::Less,
        _ => false,
    }
}

/// Conversion used by `to-boolean`.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn is_true(value: &Value) -> bool {
    matches!(value, Value::Bool(true))
}

#[cfg(test)]
#[path = "eval_tests.rs"]
mod tests;
