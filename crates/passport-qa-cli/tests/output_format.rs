//! Output format validation tests.
//!
//! Tests JSON/JSONL/text output correctness and required field presence.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use passport_qa_test_support::{PassportPhotoBuilder, SyntheticPhoto};
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn cmd(config_home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("passport-qa").unwrap();
    cmd.env("XDG_CONFIG_HOME", config_home);
    cmd
}

fn save(dir: &TempDir, name: &str, photo: &SyntheticPhoto) -> PathBuf {
    let path = dir.path().join(format!("{name}.png"));
    photo.rgb().save(&path).unwrap();
    std::fs::write(
        dir.path().join(format!("{name}.landmarks.json")),
        serde_json::to_string(&photo.landmarks).unwrap(),
    )
    .unwrap();
    path
}

fn two_photos() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    save(&dir, "a_good", &PassportPhotoBuilder::compliant());
    save(&dir, "b_small", &PassportPhotoBuilder::wrong_size());
    dir
}

// === JSONL Format Tests ===

#[test]
fn test_jsonl_one_object_per_photo() {
    let dir = two_photos();
    let output = cmd(dir.path())
        .arg("--format")
        .arg("jsonl")
        .arg(dir.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let lines: Vec<Value> = stdout
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(Value::is_object));
    assert!(lines[0]["path"].as_str().unwrap().ends_with("a_good.png"));
    assert!(lines[1]["path"].as_str().unwrap().ends_with("b_small.png"));
}

#[test]
fn test_jsonl_required_fields() {
    let dir = two_photos();
    let output = cmd(dir.path()).arg(dir.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let first: Value = serde_json::from_str(stdout.lines().next().unwrap()).unwrap();

    assert_eq!(first["dimensions"]["width"], 600);
    assert_eq!(first["dimensions"]["height"], 600);
    assert_eq!(first["overall_pass"], true);
    assert!(first["generated_at"].as_str().unwrap().contains('T'));
    assert!(first.get("metrics").is_none());

    let names: Vec<&str> = first["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap())
        .collect();
    assert_eq!(
        names,
        [
            "size",
            "head_ratio",
            "centering",
            "background_whiteness",
            "lighting"
        ]
    );
}

#[test]
fn test_failed_rule_carries_suggestion() {
    let dir = two_photos();
    let output = cmd(dir.path()).arg(dir.path()).output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let second: Value = serde_json::from_str(stdout.lines().nth(1).unwrap()).unwrap();

    let size = &second["rules"][0];
    assert_eq!(size["name"], "size");
    assert_eq!(size["passed"], false);
    assert_eq!(size["detail"], "expected 600×600, got 500×500");
    assert!(size["suggestion"].is_string());

    let head = &second["rules"][1];
    assert_eq!(head["passed"], true);
    assert!(head.get("suggestion").is_none());
}

#[test]
fn test_skipped_rule_serializes_null() {
    let dir = two_photos();
    let output = cmd(dir.path())
        .arg("--no-landmarks")
        .arg(dir.path().join("a_good.png"))
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    assert!(report["rules"][1]["passed"].is_null());
    assert!(report["rules"][2]["passed"].is_null());
    assert_eq!(report["overall_pass"], true);
}

#[test]
fn test_metrics_flag_includes_measurements() {
    let dir = two_photos();
    let output = cmd(dir.path())
        .arg("--metrics")
        .arg("--no-landmarks")
        .arg(dir.path().join("a_good.png"))
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    let report: Value = serde_json::from_str(stdout.trim()).unwrap();

    let metrics = &report["metrics"];
    assert_eq!(metrics["image_width"], 600);
    assert_eq!(metrics["head_ratio"]["status"], "unavailable");
    assert!(metrics["border_whiteness_pct"].as_f64().unwrap() > 0.99);
    assert!((metrics["luminance_mean"].as_f64().unwrap() - 200.0).abs() < 0.5);
}

// === JSON Array Tests ===

#[test]
fn test_json_format_single_array() {
    let dir = two_photos();
    let output = cmd(dir.path())
        .arg("--format")
        .arg("json")
        .arg(dir.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    let parsed: Value = serde_json::from_str(stdout.trim()).unwrap();
    let reports = parsed.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(stdout.trim().lines().count(), 1);
}

#[test]
fn test_json_pretty() {
    let dir = two_photos();
    let output = cmd(dir.path())
        .arg("--format")
        .arg("json")
        .arg("--pretty")
        .arg(dir.path())
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.lines().count() > 2);
    let parsed: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), 2);
}

#[test]
fn test_json_empty_directory_is_empty_array() {
    let dir = tempfile::tempdir().unwrap();
    cmd(dir.path())
        .arg("--format")
        .arg("json")
        .arg(dir.path())
        .assert()
        .code(0)
        .stdout(predicate::str::starts_with("[]"));
}

// === Text Format Tests ===

#[test]
fn test_text_format() {
    let dir = two_photos();
    cmd(dir.path())
        .arg("--format")
        .arg("text")
        .arg(dir.path().join("b_small.png"))
        .assert()
        .code(1)
        .stdout(
            predicate::str::contains("b_small.png (500x500)")
                .and(predicate::str::contains("Passport Photo Validation Report"))
                .and(predicate::str::contains("Overall: FAIL"))
                .and(predicate::str::contains(
                    "[FAIL] size: expected 600×600, got 500×500",
                ))
                .and(predicate::str::contains("→ Export the photo"))
                .and(predicate::str::contains("[PASS] lighting")),
        );
}

#[test]
fn test_text_format_shows_skips() {
    let dir = two_photos();
    cmd(dir.path())
        .arg("--format")
        .arg("text")
        .arg("--no-landmarks")
        .arg(dir.path().join("a_good.png"))
        .assert()
        .code(0)
        .stdout(
            predicate::str::contains("[SKIP] head_ratio")
                .and(predicate::str::contains("[SKIP] centering"))
                .and(predicate::str::contains("Overall: PASS")),
        );
}
