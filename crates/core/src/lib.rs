// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! mapdate-core: Date-range filtering for map style layers
//!
//! This crate resolves imprecise dates into ranges and rewrites layer filters,
//! in either the legacy or the expression grammar, so that only features whose
//! lifespan overlaps the range are drawn. Rewrites are idempotent: applying a
//! new date to an already constrained filter updates it in place.

pub mod config;
pub mod error;
pub mod eval;
pub mod filter;
pub mod range;
pub mod style;
pub mod time;

pub use config::Options;
pub use error::{Error, Result};
pub use eval::{evaluate, Feature};
pub use filter::{
    constrain_expression_filter_by_date_range, constrain_filter_by_date_range,
    constrain_legacy_filter_by_date_range, is_legacy_filter, Dialect, VariablePrefix,
};
pub use range::{date_range_from_date, date_range_from_iso_date, DateInput, DateRange};
pub use style::{filter_by_date, filter_by_date_range, Style, StyleLayer, StyleMap};
pub use time::{
    date_from_iso_date, date_from_utc, decimal_year_from_date, iso_date_from_date, YearNumbering,
};
