// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod common;
use common::*;

#[test]
fn apply_writes_constrained_style_to_stdout() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);

    let output = mapdate()
        .arg("apply")
        .arg(&style)
        .arg("--date")
        .arg("1912")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json = json_output(&output);
    assert_eq!(json["name"], "Historical");
    assert!(json["layers"][0].get("filter").is_none());
    assert_eq!(json["layers"][1]["filter"][0], "all");
    assert_eq!(json["layers"][2]["filter"][0], "let");
    assert_eq!(json["layers"][2]["filter"][4], "1912-01-01");
}

#[test]
fn apply_reads_stdin() {
    mapdate()
        .arg("apply")
        .arg("-")
        .arg("--date")
        .arg("-0044-03-15")
        .write_stdin(STYLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("-000044-03-15"));
}

#[test]
fn apply_defaults_to_today() {
    mapdate()
        .arg("apply")
        .arg("-")
        .write_stdin(STYLE)
        .assert()
        .success()
        .stdout(predicate::str::contains("mapdate__startISODate"));
}

#[test]
fn apply_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);
    let dated = temp.path().join("dated.json");

    mapdate()
        .arg("apply")
        .arg(&style)
        .arg("-d")
        .arg("2013-04")
        .arg("-o")
        .arg(&dated)
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let written = std::fs::read_to_string(&dated).unwrap();
    assert!(written.contains("2013-05-01"));
}

#[test]
fn apply_twice_does_not_nest() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);
    let once = temp.path().join("once.json");
    let twice = temp.path().join("twice.json");

    for (input, output, date) in [(&style, &once, "1912"), (&once, &twice, "2013")] {
        mapdate()
            .arg("apply")
            .arg(input)
            .args(["--date", date, "--output"])
            .arg(output)
            .assert()
            .success();
    }

    let twice = json_output(&std::fs::read(&twice).unwrap());
    assert_eq!(twice["layers"][1]["filter"].as_array().unwrap().len(), 4);
    assert_eq!(
        twice["layers"][1]["filter"][3],
        serde_json::json!(["==", "class", "primary"])
    );
    assert_eq!(twice["layers"][2]["filter"].as_array().unwrap().len(), 10);
}

#[test]
fn apply_uses_config_prefix() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);
    let config = temp.path().join("mapdate.toml");
    std::fs::write(&config, "variable_prefix = \"ohm\"\n").unwrap();

    mapdate()
        .arg("apply")
        .arg(&style)
        .args(["--date", "1912", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("ohm__startDecimalYear"))
        .stdout(predicate::str::contains("mapdate__").not());
}

#[test]
fn apply_rejects_invalid_date() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);

    mapdate()
        .arg("apply")
        .arg(&style)
        .args(["--date", "April 1912"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::starts_with("error: invalid date: 'April 1912'"))
        .stderr(predicate::str::contains("hint"));
}

#[test]
fn apply_reports_missing_file() {
    let temp = TempDir::new().unwrap();

    mapdate()
        .arg("apply")
        .arg(temp.path().join("missing.json"))
        .args(["--date", "1912"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"))
        .stderr(predicate::str::contains("missing.json"));
}

#[test]
fn apply_rejects_non_object_style() {
    mapdate()
        .args(["apply", "-", "--date", "1912"])
        .write_stdin("[]")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid style document"));
}

#[test]
fn apply_rejects_bad_config() {
    let temp = TempDir::new().unwrap();
    let style = style_file(&temp);
    let config = temp.path().join("mapdate.toml");
    std::fs::write(&config, "variable_prefix = \"a__b\"\n").unwrap();

    mapdate()
        .arg("apply")
        .arg(&style)
        .args(["--date", "1912", "--config"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}
