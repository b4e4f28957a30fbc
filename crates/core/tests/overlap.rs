// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Overlap semantics of constrained filters, checked by evaluating both
//! grammars against the same features.

#![allow(clippy::unwrap_used)]

use chrono::{TimeZone, Utc};
use mapdate_core::{
    constrain_expression_filter_by_date_range, constrain_legacy_filter_by_date_range,
    date_range_from_iso_date, evaluate, is_legacy_filter, DateRange, Feature, Options, Style,
    StyleMap, VariablePrefix, YearNumbering,
};
use serde_json::{json, Value};
use yare::parameterized;

/// `[2013.5, 2013.5 + 1/365)`: noon on July 2 to noon on July 3, 2013.
fn one_day() -> DateRange {
    let start = Utc.with_ymd_and_hms(2013, 7, 2, 12, 0, 0).unwrap();
    let end = Utc.with_ymd_and_hms(2013, 7, 3, 12, 0, 0).unwrap();
    DateRange::from_dates(start, end, YearNumbering::Astronomical).unwrap()
}

fn feature(properties: Value) -> Feature {
    let Value::Object(properties) = properties else {
        unreachable!()
    };
    Feature::with_properties(properties)
}

/// Evaluates `filter` constrained to `range` in both grammars and checks they
/// agree.
fn passes(filter: Option<&Value>, range: &DateRange, properties: Value) -> bool {
    let feature = feature(properties);
    let legacy = constrain_legacy_filter_by_date_range(filter, range);
    let expression =
        constrain_expression_filter_by_date_range(filter, range, &VariablePrefix::default());
    assert!(is_legacy_filter(&legacy));
    assert!(!is_legacy_filter(&expression));

    let by_legacy = evaluate(&legacy, &feature).unwrap();
    let by_expression = evaluate(&expression, &feature).unwrap();
    assert_eq!(by_legacy, by_expression, "grammars disagree on {feature:?}");
    by_legacy
}

const DAY: f64 = 1.0 / 365.0;

#[test]
fn range_starts_at_mid_year() {
    assert_eq!(one_day().start_decimal_year, Some(2013.5));
}

#[parameterized(
    ended_before = { json!({ "end_decdate": 2013.5 - DAY }), false },
    started_before = { json!({ "start_decdate": 2013.5 - DAY }), true },
    undated = { json!({}), true },
    instant_inside = { json!({ "start_decdate": 2013.5 + DAY / 2.0, "end_decdate": 2013.5 + DAY / 2.0 }), true },
    starts_after = { json!({ "start_decdate": 2014.0 }), false },
    ends_after = { json!({ "end_decdate": 2014.0 }), true },
    spans_range = { json!({ "start_decdate": 1900.0, "end_decdate": 2100.0 }), true },
    ends_at_range_start = { json!({ "end_decdate": 2013.5 }), true },
)]
fn decimal_year_overlap(properties: Value, expected: bool) {
    assert_eq!(passes(None, &one_day(), properties), expected);
}

#[test]
fn range_end_is_exclusive() {
    let range = one_day();
    let end = range.end_decimal_year.unwrap();
    assert!(!passes(None, &range, json!({ "start_decdate": end })));
}

#[parameterized(
    starts_inside = { json!({ "start_date": "2013-07-02" }), true },
    starts_at_end = { json!({ "start_date": "2013-07-03" }), false },
    ended_before = { json!({ "end_date": "2013-07-01" }), false },
    ends_at_start = { json!({ "end_date": "2013-07-02" }), true },
    both_bounds = { json!({ "start_date": "1900-01-01", "end_date": "1950-01-01" }), false },
)]
fn iso_date_fallback(properties: Value, expected: bool) {
    assert_eq!(passes(None, &one_day(), properties), expected);
}

#[test]
fn decimal_year_takes_priority_over_iso_date() {
    let properties = json!({ "start_decdate": 2014.0, "start_date": "1900-01-01" });
    assert!(!passes(None, &one_day(), properties));

    let properties = json!({ "end_decdate": 2014.0, "end_date": "1900-01-01" });
    assert!(passes(None, &one_day(), properties));
}

#[test]
fn expanded_year_end_breaks_iso_fallback() {
    // `+010000-01-01` sorts below every four-digit year, so the string
    // fallback excludes features that the decimal year keeps.
    let range = date_range_from_iso_date("9999", YearNumbering::Astronomical).unwrap();
    assert_eq!(range.end_iso_date.as_deref(), Some("+010000-01-01"));

    assert!(!passes(None, &range, json!({ "start_date": "5000-01-01" })));
    assert!(passes(None, &range, json!({ "start_decdate": 5000.0 })));
}

#[test]
fn original_filter_still_applies() {
    let range = date_range_from_iso_date("2013", YearNumbering::Astronomical).unwrap();
    let legacy = json!(["==", "class", "primary"]);
    let expression = json!(["==", ["get", "class"], "primary"]);

    for filter in [&legacy, &expression] {
        let constrained = mapdate_core::constrain_filter_by_date_range(
            Some(filter),
            &range,
            &Options::default(),
        );
        let primary = feature(json!({ "class": "primary", "start_decdate": 2000.0 }));
        let secondary = feature(json!({ "class": "secondary", "start_decdate": 2000.0 }));
        assert!(evaluate(&constrained, &primary).unwrap());
        assert!(!evaluate(&constrained, &secondary).unwrap());
    }
}

#[test]
fn updated_filter_follows_new_range() {
    let options = Options::default();
    let first = date_range_from_iso_date("1912", options.year_numbering).unwrap();
    let second = date_range_from_iso_date("2013", options.year_numbering).unwrap();
    let titanic = feature(json!({ "start_date": "1911-05-31", "end_date": "1912-04-15" }));

    let filter = json!(["has", "start_date"]);
    let once = mapdate_core::constrain_filter_by_date_range(Some(&filter), &first, &options);
    assert!(evaluate(&once, &titanic).unwrap());

    let twice = mapdate_core::constrain_filter_by_date_range(Some(&once), &second, &options);
    assert!(!evaluate(&twice, &titanic).unwrap());
}

#[test]
fn building_example_end_to_end() {
    let start = Utc.with_ymd_and_hms(2013, 7, 2, 12, 0, 0).unwrap();
    let range = DateRange::from_dates(start, start, YearNumbering::Astronomical).unwrap();
    assert_eq!(range.start_decimal_year, Some(2013.5));

    let constrained = constrain_legacy_filter_by_date_range(Some(&json!(["has", "building"])), &range);
    let all = constrained.as_array().unwrap();
    assert_eq!(all.len(), 4);
    assert_eq!(all[1][0], "any");
    assert_eq!(all[1].as_array().unwrap().len(), 4);
    assert_eq!(all[2].as_array().unwrap().len(), 4);
    assert_eq!(all[3], json!(["has", "building"]));

    assert!(evaluate(&constrained, &feature(json!({ "building": "yes" }))).unwrap());
    assert!(!evaluate(&constrained, &feature(json!({ "amenity": "cafe" }))).unwrap());
}

#[test]
fn style_document_end_to_end() {
    let mut style = Style::from_json(
        r#"{
            "version": 8,
            "layers": [
                { "id": "background", "type": "background" },
                { "id": "buildings", "type": "fill", "source-layer": "building",
                  "filter": ["==", "$type", "Polygon"] }
            ]
        }"#,
    )
    .unwrap();

    let count = mapdate_core::filter_by_date(&mut style, "1850", &Options::default()).unwrap();
    assert_eq!(count, 1);
    assert_eq!(style.filter("background"), None);

    let filter = style.filter("buildings").unwrap();
    let mut building = feature(json!({ "start_decdate": 1801.0, "end_decdate": 1901.0 }));
    building.geometry_type = Some("Polygon".into());
    assert!(evaluate(&filter, &building).unwrap());

    building.properties.insert("end_decdate".into(), json!(1849.0));
    assert!(!evaluate(&filter, &building).unwrap());
}
