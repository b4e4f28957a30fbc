// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

// Allow unused items: test helpers are shared across multiple test binaries,
// and not every test file uses every helper.
#![allow(dead_code)]
#![allow(unused_imports)]

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;

pub use predicates::prelude::*;
pub use tempfile::TempDir;

pub const STYLE: &str = r#"{
  "version": 8,
  "name": "Historical",
  "sources": { "osm": { "type": "vector", "url": "https://example.com/tiles.json" } },
  "layers": [
    { "id": "background", "type": "background" },
    { "id": "roads", "type": "line", "source": "osm", "source-layer": "transportation",
      "filter": ["==", "class", "primary"] },
    { "id": "buildings", "type": "fill", "source": "osm", "source-layer": "building",
      "filter": ["has", ["get", "height"]] }
  ]
}"#;

pub fn mapdate() -> Command {
    let mut cmd = cargo_bin_cmd!("mapdate");
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Helper to write the sample style into a temp directory
pub fn style_file(temp: &TempDir) -> PathBuf {
    let path = temp.path().join("style.json");
    fs::write(&path, STYLE).unwrap();
    path
}

/// Parses command output as JSON
pub fn json_output(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).unwrap()
}
