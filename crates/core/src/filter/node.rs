// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared shapes of the filter nodes the rewriters emit and recognize.

use serde_json::Value;

use crate::range::DateRange;

/// Splits an `[operator, ...args]` node into its operator and arguments.
pub(crate) fn split_node(value: &Value) -> Option<(&str, &[Value])> {
    match value.as_array()?.split_first()? {
        (Value::String(op), args) => Some((op.as_str(), args)),
        _ => None,
    }
}

/// Returns the arguments of `value` if it is a node with the given operator.
pub(crate) fn node_args<'a>(value: &'a Value, op: &str) -> Option<&'a [Value]> {
    split_node(value).and_then(|(head, args)| (head == op).then_some(args))
}

/// Treats a JSON `null` filter the same as no filter.
pub(crate) fn present(filter: Option<&Value>) -> Option<&Value> {
    filter.filter(|f| !f.is_null())
}

/// A value the rewriters inject from a [`DateRange`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RangeField {
    StartDecimalYear,
    StartIsoDate,
    EndDecimalYear,
    EndIsoDate,
}

impl RangeField {
    /// All fields, in binding order.
    pub const ALL: [RangeField; 4] = [
        RangeField::StartDecimalYear,
        RangeField::StartIsoDate,
        RangeField::EndDecimalYear,
        RangeField::EndIsoDate,
    ];

    /// Name used as the suffix of injected variables.
    pub fn name(self) -> &'static str {
        match self {
            RangeField::StartDecimalYear => "startDecimalYear",
            RangeField::StartIsoDate => "startISODate",
            RangeField::EndDecimalYear => "endDecimalYear",
            RangeField::EndIsoDate => "endISODate",
        }
    }

    /// The field's value in `range`, if it is valid.
    pub fn value(self, range: &DateRange) -> Option<Value> {
        match self {
            RangeField::StartDecimalYear => range.start_decimal_year.map(Value::from),
            RangeField::StartIsoDate => range.start_iso_date.clone().map(Value::from),
            RangeField::EndDecimalYear => range.end_decimal_year.map(Value::from),
            RangeField::EndIsoDate => range.end_iso_date.clone().map(Value::from),
        }
    }
}

/// One side of the overlap test between a feature and a range.
///
/// A feature overlaps `[start, end)` when its start precedes the range's end
/// and its end is not before the range's start. A missing bound is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Bound {
    Start,
    End,
}

impl Bound {
    /// Numeric feature property holding this bound as a decimal year.
    pub fn decimal_property(self) -> &'static str {
        match self {
            Bound::Start => "start_decdate",
            Bound::End => "end_decdate",
        }
    }

    /// Fallback feature property holding this bound as an ISO date.
    pub fn iso_property(self) -> &'static str {
        match self {
            Bound::Start => "start_date",
            Bound::End => "end_date",
        }
    }

    pub fn comparison(self) -> &'static str {
        match self {
            Bound::Start => "<",
            Bound::End => ">=",
        }
    }

    /// The range field compared against the decimal property.
    pub fn decimal_limit(self) -> RangeField {
        match self {
            Bound::Start => RangeField::EndDecimalYear,
            Bound::End => RangeField::StartDecimalYear,
        }
    }

    /// The range field compared against the ISO property.
    pub fn iso_limit(self) -> RangeField {
        match self {
            Bound::Start => RangeField::EndIsoDate,
            Bound::End => RangeField::StartIsoDate,
        }
    }
}
