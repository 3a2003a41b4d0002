//! CLI integration tests.
//!
//! Drives the `pagecheck` binary against temporary documents. Every run is
//! `--offline` so no validator is contacted.

use crate::mocks::*;
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn pagecheck() -> Command {
    let mut cmd = Command::cargo_bin("pagecheck").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("PAGECHECK_FORMAT")
        .env_remove("PAGECHECK_VALIDATOR_URL")
        .env_remove("RUST_LOG");
    cmd
}

fn page(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("index.html");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

#[test]
fn test_good_page_exits_zero() {
    let (_dir, path) = page(GOOD_PAGE);
    pagecheck()
        .arg(&path)
        .arg("--offline")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("[SKIP] CONF-001"))
        .stdout(predicate::str::contains("Exit code: 0 (all checks passed)"));
}

#[test]
fn test_check_subcommand_is_equivalent() {
    let (_dir, path) = page(GOOD_PAGE);
    pagecheck()
        .arg("check")
        .arg(&path)
        .arg("--offline")
        .assert()
        .success();
}

#[test]
fn test_missing_lang_exits_one() {
    let (_dir, path) = page(NO_LANG_PAGE);
    pagecheck()
        .arg(&path)
        .arg("--offline")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FAIL] STR-003"))
        .stdout(predicate::str::contains("\"en\""));
}

#[test]
fn test_default_path_is_index_html() {
    let (dir, _path) = page(GOOD_PAGE);
    pagecheck()
        .current_dir(dir.path())
        .arg("--offline")
        .assert()
        .success()
        .stdout(predicate::str::contains("index.html"));
}

#[test]
fn test_missing_document_exits_three() {
    let dir = tempfile::tempdir().unwrap();
    pagecheck()
        .arg(dir.path().join("nope.html"))
        .arg("--offline")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("nope.html"));
}

#[test]
fn test_empty_document_fails_every_markup_rule() {
    let (_dir, path) = page("  \n");
    let output = pagecheck().arg(&path).arg("--offline").output().unwrap();
    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8(output.stdout).unwrap();
    for id in [
        "STR-001", "STR-002", "STR-003", "STR-004", "HEAD-001", "HEAD-002", "HEAD-003", "HEAD-004",
    ] {
        assert!(stdout.contains(&format!("[FAIL] {}", id)), "{} did not fail:\n{}", id, stdout);
    }
    assert!(stdout.contains("[SKIP] CONF-001"));
}

#[test]
fn test_json_output() {
    let (_dir, path) = page(NO_LANG_PAGE);
    let output = pagecheck()
        .arg(&path)
        .args(["--offline", "--format", "json"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["summary"]["failed"], 1);
    assert_eq!(value["summary"]["skipped"], 1);
}

#[test]
fn test_junit_output() {
    let (_dir, path) = page(GOOD_PAGE);
    pagecheck()
        .arg(&path)
        .args(["--offline", "--format", "junit"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("<?xml"))
        .stdout(predicate::str::contains("<skipped message="));
}

#[test]
fn test_only_and_skip() {
    let (_dir, path) = page(NO_LANG_PAGE);
    pagecheck()
        .arg(&path)
        .args(["--offline", "--only", "STR-001,HEAD-004"])
        .assert()
        .success()
        .stdout(predicate::str::contains("STR-003").not());

    pagecheck()
        .arg(&path)
        .args(["--offline", "--skip", "STR-003"])
        .assert()
        .success();
}

#[test]
fn test_strict_requires_meta_tags() {
    let (_dir, path) = page(GOOD_PAGE);
    pagecheck()
        .arg(&path)
        .args(["--offline", "--strict"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("[FAIL] META-005"));

    let (_dir, path) = page(STRICT_PAGE);
    pagecheck()
        .arg(&path)
        .args(["--offline", "--strict"])
        .assert()
        .success();
}

#[test]
fn test_list_command() {
    pagecheck()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("STR-001"))
        .stdout(predicate::str::contains("CONF-001"))
        .stdout(predicate::str::contains("META-001").not());

    pagecheck()
        .args(["list", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("META-005"));
}

#[test]
fn test_version_command() {
    pagecheck()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pagecheck "));
}

#[test]
fn test_invalid_format_exits_three() {
    pagecheck().args(["--format", "yaml"]).assert().code(3);
}

#[test]
fn test_help_exits_zero() {
    pagecheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--offline"));
}
