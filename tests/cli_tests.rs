//! Binary tests for the gridmodel command line

#![allow(deprecated)] // Command::cargo_bin deprecation - no stable replacement yet

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

fn gridmodel() -> Command {
    Command::cargo_bin("gridmodel").unwrap()
}

fn demo_inputs() -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("demos/inputs")
}

#[test]
fn test_help_lists_commands() {
    gridmodel()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("shift"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn test_package_metadata() {
    assert_eq!(env!("CARGO_PKG_HOMEPAGE"), "https://github.com/royalbit/gridmodel");
    assert!(Path::new(env!("CARGO_MANIFEST_DIR")).join("LICENSE").is_file());
}

#[test]
fn test_shift_offset() {
    gridmodel()
        .args(["shift", "=B5+B6", "--offset", "2"])
        .assert()
        .success()
        .stdout("=D5+D6\n");
}

#[test]
fn test_shift_years() {
    gridmodel()
        .args(["shift", "='Assumptions_Macro'!C2", "--years", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0\t='Assumptions_Macro'!C2"))
        .stdout(predicate::str::contains("1\t='Assumptions_Macro'!D2"));
}

#[test]
fn test_shift_rejects_offset_with_years() {
    gridmodel()
        .args(["shift", "=B1", "--offset", "1", "--years", "3"])
        .assert()
        .failure();
}

#[test]
fn test_generate_writes_workbook() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xlsx");

    gridmodel()
        .arg("generate")
        .arg("--input-dir")
        .arg(demo_inputs())
        .arg("--output")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Workbook written"));

    assert!(output.exists());
}

#[test]
fn test_generate_strict_fails_without_inputs() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xlsx");

    gridmodel()
        .arg("generate")
        .arg("--input-dir")
        .arg(dir.path())
        .arg("--output")
        .arg(&output)
        .arg("--strict")
        .assert()
        .failure()
        .stdout(predicate::str::contains("8 warning(s)"));

    assert!(output.exists());
}

#[test]
fn test_inspect_generated_workbook() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xlsx");

    gridmodel()
        .arg("generate")
        .arg("--input-dir")
        .arg(demo_inputs())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    gridmodel()
        .arg("inspect")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cover_Summary"))
        .stdout(predicate::str::contains("RAV_RateBase_Forecast"));

    gridmodel()
        .arg("inspect")
        .arg(&output)
        .args(["--sheet", "RAV_RateBase_Forecast", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"address\": \"B3\""))
        .stdout(predicate::str::contains("Hist_RAV_RateBase"));
}

#[test]
fn test_inspect_unknown_sheet_fails() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.xlsx");
    gridmodel()
        .arg("generate")
        .arg("--input-dir")
        .arg(demo_inputs())
        .arg("--output")
        .arg(&output)
        .assert()
        .success();

    gridmodel()
        .arg("inspect")
        .arg(&output)
        .args(["--sheet", "Nope"])
        .assert()
        .failure();
}

#[test]
fn test_init_writes_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gridmodel.yaml");

    gridmodel().arg("init").arg(&path).assert().success();

    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("forecast_years: 16"));
    assert!(content.contains("Assumptions_Macro"));

    gridmodel().arg("init").arg(&path).assert().failure();
}
