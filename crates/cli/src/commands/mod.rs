// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

pub mod apply;
pub mod range;

use std::path::Path;

use mapdate_core::Options;
use tracing::debug;

use crate::error::Result;

/// Loads options from `path`, or the defaults when no file is given.
pub(crate) fn load_options(path: Option<&Path>) -> Result<Options> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading options");
            Ok(Options::load(path)?)
        }
        None => Ok(Options::default()),
    }
}
