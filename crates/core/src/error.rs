// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for mapdate-core operations.

use thiserror::Error;

/// All possible errors that can occur in mapdate-core operations.
///
/// Date parsing and filter rewriting signal bad input through `Option` and
/// fallbacks rather than errors; these variants cover the boundaries where a
/// caller needs a reason (configuration, resolving a date for a whole style,
/// evaluating a filter).
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid date: '{0}'\n  hint: use YYYY, YYYY-MM or YYYY-MM-DD, optionally with a leading '-' for BCE years")]
    InvalidDate(String),

    #[error("invalid variable prefix '{prefix}': {reason}")]
    InvalidVariablePrefix { prefix: String, reason: String },

    #[error("unsupported filter operator: '{0}'")]
    UnsupportedOperator(String),

    #[error("unbound variable in filter: '{0}'")]
    UnboundVariable(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// A specialized Result type for mapdate-core operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
