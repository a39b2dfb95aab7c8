//! CLI argument validation tests.
//!
//! Tests command-line argument parsing, validation, and error handling.
//! None of these require the detector model to be present.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_subcommand_shows_usage() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_check_requires_image_argument() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("check");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("IMAGE").or(predicate::str::contains("required")));
}

#[test]
fn test_check_rejects_out_of_range_threshold() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["check", "frame.png", "--threshold", "300"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("0..=255"));
}

#[test]
fn test_check_rejects_non_numeric_threshold() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["check", "frame.png", "--threshold", "bright"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not a valid number"));
}

#[test]
fn test_check_missing_image_is_operational_error() {
    let temp = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["check", "/nonexistent/frame.png"])
        .args(["--models-dir", temp.path().to_str().unwrap()])
        .args(["--calibration-file", "/nonexistent/calibration.toml"]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_check_without_model_hints_at_fetch() {
    let temp = tempfile::tempdir().unwrap();
    let frame = temp.path().join("frame.png");
    image::DynamicImage::new_rgb8(64, 64).save(&frame).unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("check")
        .arg(&frame)
        .args(["--models-dir", temp.path().to_str().unwrap()]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("models fetch"));
}

#[test]
fn test_monitor_requires_frames() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("monitor");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("FRAMES").or(predicate::str::contains("required")));
}

#[test]
fn test_calibrate_requires_both_phases() {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["calibrate", "--open", "open_dir"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--closed").or(predicate::str::contains("required")));
}

#[test]
fn test_models_path_reports_missing_model() {
    let temp = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["models", "path"])
        .args(["--models-dir", temp.path().to_str().unwrap()]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("det_10g.onnx").and(predicate::str::contains("missing")));
}

#[test]
fn test_verbose_flag_is_accepted_anywhere() {
    let temp = tempfile::tempdir().unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.args(["models", "path", "-vv"])
        .args(["--models-dir", temp.path().to_str().unwrap()]);

    cmd.assert().success();
}
