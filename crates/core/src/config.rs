// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Rewrite options, loadable from TOML.
//!
//! ```toml
//! variable_prefix = "mapdate"
//! year_numbering = "astronomical"  # or "historical"
//! ```
//!
//! Every key is optional.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::filter::VariablePrefix;
use crate::time::YearNumbering;

/// Options shared by every rewrite of a style.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Options {
    /// Namespace of the variables bound in expression filters.
    pub variable_prefix: VariablePrefix,
    /// Numbering of BCE years in decimal-year properties.
    pub year_numbering: YearNumbering,
}

impl Options {
    /// Parses options from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Reads options from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
