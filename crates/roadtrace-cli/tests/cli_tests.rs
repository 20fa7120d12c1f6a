//! Integration tests for the `inspect` and `route` subcommands.

use std::fs;
use std::path::PathBuf;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../docs/fixtures/small_town.json")
        .canonicalize()
        .expect("fixture document present")
}

fn cli() -> Command {
    let mut cmd = cargo_bin_cmd!("roadtrace-cli");
    cmd.env("RUST_LOG", "error");
    cmd
}

#[test]
fn inspect_reports_network_size() {
    cli()
        .arg("inspect")
        .arg("--input")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Network: 11 nodes, 11 edges"));
}

#[test]
fn config_file_changes_highway_filter() {
    let temp = tempdir().expect("create temp dir");
    let config_path = temp.path().join("roadtrace.json");
    fs::write(
        &config_path,
        r#"{"highway_filter": {"require_highway": false, "excluded": []}}"#,
    )
    .expect("write config");

    cli()
        .arg("--config")
        .arg(&config_path)
        .arg("--format")
        .arg("json")
        .arg("inspect")
        .arg("--input")
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"edges\": 13"));
}

#[test]
fn route_prints_path() {
    cli()
        .args(["route", "--from", "1", "--to", "9", "--input"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("Path: 1 -> 9 (4 hops"));
}

#[test]
fn route_json_includes_timeline() {
    let output = cli()
        .args(["--format", "json", "route", "--from", "1", "--to", "9", "--timeline"])
        .arg("--input")
        .arg(fixture_path())
        .output()
        .expect("command runs");
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(value["found"], true);
    assert_eq!(value["path"][0], 1);
    assert_eq!(value["path"][4], 9);
    assert_eq!(value["timeline"]["total_frames"], 500);
    assert_eq!(value["timeline"]["path"][0]["frame"], 320);
}

#[test]
fn route_to_other_component_reports_no_path() {
    cli()
        .args(["route", "--from", "1", "--to-coord", "50.01,8.011", "--input"])
        .arg(fixture_path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with("No path: 1 -> 21"));
}

#[test]
fn unknown_node_fails() {
    cli()
        .args(["route", "--from", "42", "--to", "9", "--input"])
        .arg(fixture_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("node 42 is not in the graph"));
}

#[test]
fn invalid_coordinate_is_rejected_by_parser() {
    cli()
        .args(["route", "--from-coord", "north", "--to", "9", "--input"])
        .arg(fixture_path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid coordinate"));
}

#[test]
fn missing_input_file_fails() {
    cli()
        .args(["inspect", "--input", "/nonexistent/road.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load road data"));
}
