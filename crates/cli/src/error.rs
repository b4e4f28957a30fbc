// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

/// Errors reported by the `mapdate` command.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] mapdate_core::Error),

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("cannot write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid style document: {0}\n  hint: expected a JSON object with a 'layers' array")]
    InvalidStyle(serde_json::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for the `mapdate` command.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
