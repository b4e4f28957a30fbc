// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Applying a date to every data-driven layer of a map style.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, trace};

use crate::config::Options;
use crate::error::{Error, Result};
use crate::filter::{constrain_filter_by_date_range, Dialect};
use crate::range::{date_range_from_date, DateInput, DateRange};

/// A layer as listed by a [`StyleMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleLayer {
    pub id: String,
    /// Name of the vector tile layer the style layer draws from. Layers
    /// without one (backgrounds, rasters) are never filtered.
    pub source_layer: Option<String>,
}

/// A map whose layer filters can be read and replaced.
pub trait StyleMap {
    /// Layers in drawing order.
    fn layers(&self) -> Vec<StyleLayer>;

    /// The current filter of a layer, if it has one.
    fn filter(&self, layer_id: &str) -> Option<Value>;

    fn set_filter(&mut self, layer_id: &str, filter: Value);
}

/// Constrains every data-driven layer of `map` to the range `date` denotes.
///
/// Returns the number of layers rewritten.
///
/// # Errors
///
/// Returns [`Error::InvalidDate`] without touching the map if `date` is not a
/// valid date.
pub fn filter_by_date<M>(map: &mut M, date: impl Into<DateInput>, options: &Options) -> Result<usize>
where
    M: StyleMap + ?Sized,
{
    let date = date.into();
    let range = date_range_from_date(&date, options.year_numbering)
        .ok_or_else(|| Error::InvalidDate(date.to_string()))?;
    Ok(filter_by_date_range(map, &range, options))
}

/// Constrains every data-driven layer of `map` to `range`.
///
/// Filters already constrained by an earlier call are updated in place, so
/// repeated calls do not nest. Returns the number of layers rewritten.
pub fn filter_by_date_range<M>(map: &mut M, range: &DateRange, options: &Options) -> usize
where
    M: StyleMap + ?Sized,
{
    let mut rewritten = 0;
    for layer in map.layers() {
        if layer.source_layer.is_none() {
            trace!(layer = %layer.id, "skipping layer without source-layer");
            continue;
        }

        let filter = map.filter(&layer.id);
        let dialect = Dialect::of(filter.as_ref());
        let constrained = constrain_filter_by_date_range(filter.as_ref(), range, options);
        map.set_filter(&layer.id, constrained);
        debug!(layer = %layer.id, dialect = dialect.as_str(), "constrained layer filter");
        rewritten += 1;
    }
    rewritten
}

/// A style document.
///
/// Only `layers[].id`, `layers[].source-layer` and `layers[].filter` are
/// interpreted; everything else is carried through unchanged and in order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Style {
    document: Map<String, Value>,
}

impl Style {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The raw document.
    pub fn as_json(&self) -> &Map<String, Value> {
        &self.document
    }

    fn layer_objects(&self) -> impl Iterator<Item = &Map<String, Value>> {
        self.document
            .get("layers")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(Value::as_object)
    }

    fn layer(&self, id: &str) -> Option<&Map<String, Value>> {
        self.layer_objects()
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(id))
    }

    fn layer_mut(&mut self, id: &str) -> Option<&mut Map<String, Value>> {
        self.document
            .get_mut("layers")
            .and_then(Value::as_array_mut)?
            .iter_mut()
            .filter_map(Value::as_object_mut)
            .find(|layer| layer.get("id").and_then(Value::as_str) == Some(id))
    }
}

impl StyleMap for Style {
    fn layers(&self) -> Vec<StyleLayer> {
        self.layer_objects()
            .filter_map(|layer| {
                Some(StyleLayer {
                    id: layer.get("id")?.as_str()?.to_string(),
                    source_layer: layer
                        .get("source-layer")
                        .and_then(Value::as_str)
                        .map(str::to_string),
                })
            })
            .collect()
    }

    fn filter(&self, layer_id: &str) -> Option<Value> {
        self.layer(layer_id)?.get("filter").cloned()
    }

    fn set_filter(&mut self, layer_id: &str, filter: Value) {
        if let Some(layer) = self.layer_mut(layer_id) {
            layer.insert("filter".to_string(), filter);
        }
    }
}

#[cfg(test)]
#[path = "style_tests.rs"]
mod tests;
