// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use super::*;
use clap::CommandFactory;
use yare::parameterized;

fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(args)
}

#[test]
fn definition_is_valid() {
    Cli::command().debug_assert();
}

#[test]
fn apply_with_all_options() {
    let cli = parse(&[
        "mapdate", "apply", "style.json", "--date", "1912-04", "--output", "out.json", "--config",
        "mapdate.toml",
    ])
    .unwrap();
    match cli.command {
        Command::Apply {
            style,
            date,
            output,
            config,
        } => {
            assert_eq!(style, "style.json");
            assert_eq!(date.as_deref(), Some("1912-04"));
            assert_eq!(output, Some(PathBuf::from("out.json")));
            assert_eq!(config, Some(PathBuf::from("mapdate.toml")));
        }
        Command::Range { .. } => panic!("expected apply"),
    }
}

#[test]
fn apply_defaults() {
    let cli = parse(&["mapdate", "apply", "-"]).unwrap();
    match cli.command {
        Command::Apply {
            style,
            date,
            output,
            config,
        } => {
            assert_eq!(style, "-");
            assert_eq!(date, None);
            assert_eq!(output, None);
            assert_eq!(config, None);
        }
        Command::Range { .. } => panic!("expected apply"),
    }
}

#[parameterized(
    long = { &["mapdate", "apply", "s.json", "--date", "-0044"] },
    short = { &["mapdate", "apply", "s.json", "-d", "-0044-03-15"] },
)]
fn apply_accepts_negative_dates(args: &[&str]) {
    let cli = parse(args).unwrap();
    match cli.command {
        Command::Apply { date, .. } => assert!(date.unwrap().starts_with("-0044")),
        Command::Range { .. } => panic!("expected apply"),
    }
}

#[test]
fn apply_rejects_empty_date() {
    assert!(parse(&["mapdate", "apply", "s.json", "--date", " "]).is_err());
}

#[test]
fn apply_requires_style() {
    assert!(parse(&["mapdate", "apply"]).is_err());
}

#[parameterized(
    year = { "1912" },
    bce = { "-0044" },
)]
fn range_takes_date(input: &str) {
    let cli = parse(&["mapdate", "range", input]).unwrap();
    match cli.command {
        Command::Range { date, config } => {
            assert_eq!(date, input);
            assert_eq!(config, None);
        }
        Command::Apply { .. } => panic!("expected range"),
    }
}
