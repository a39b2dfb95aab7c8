//! Status command and calibration store behavior through the CLI.

#![allow(clippy::unwrap_used)]
#![allow(deprecated)] // cargo_bin deprecation

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn status_cmd(store: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("status")
        .args(["--calibration-file", store.to_str().unwrap()]);
    cmd
}

#[test]
fn test_status_without_calibration_reports_default() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");

    status_cmd(&store).assert().code(1).stdout(
        predicate::str::contains("\"calibrated\":false")
            .and(predicate::str::contains("\"threshold\":90")),
    );
}

#[test]
fn test_status_with_valid_calibration() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    std::fs::write(
        &store,
        "# wake-check brightness threshold calibration\n\
         threshold = 100\n\
         open_avg = 150.00\n\
         closed_avg = 60.00\n\
         separation = 90.00\n",
    )
    .unwrap();

    status_cmd(&store).assert().code(0).stdout(
        predicate::str::contains("\"valid\":true")
            .and(predicate::str::contains("\"threshold\":100"))
            .and(predicate::str::contains("\"quality\":\"excellent\"")),
    );
}

#[test]
fn test_status_flags_inverted_calibration() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    std::fs::write(
        &store,
        "threshold = 100\nopen_avg = 60.00\nclosed_avg = 150.00\nseparation = 90.00\n",
    )
    .unwrap();

    status_cmd(&store).assert().code(1).stdout(
        predicate::str::contains("\"valid\":false").and(predicate::str::contains("inverted")),
    );
}

#[test]
fn test_status_flags_out_of_range_threshold() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    std::fs::write(
        &store,
        "threshold = 250\nopen_avg = 150.00\nclosed_avg = 60.00\nseparation = 90.00\n",
    )
    .unwrap();

    status_cmd(&store)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"valid\":false"));
}

#[test]
fn test_status_flags_thin_separation() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    std::fs::write(
        &store,
        "threshold = 100\nopen_avg = 105.00\nclosed_avg = 100.00\nseparation = 5.00\n",
    )
    .unwrap();

    status_cmd(&store)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"valid\":false"));
}

#[test]
fn test_status_reports_unreadable_store() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    std::fs::write(&store, "threshold = = broken").unwrap();

    status_cmd(&store)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"calibrated\":false"));
}

#[test]
fn test_calibrate_refuses_to_overwrite_valid_calibration() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("calibration.toml");
    let original = "threshold = 100\nopen_avg = 150.00\nclosed_avg = 60.00\nseparation = 90.00\n";
    std::fs::write(&store, original).unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("calibrate")
        .args(["--open", "open_dir", "--closed", "closed_dir"])
        .args(["--calibration-file", store.to_str().unwrap()]);

    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("--force"));

    // The refusal left the stored calibration untouched.
    assert_eq!(std::fs::read_to_string(&store).unwrap(), original);
}

#[test]
fn test_config_file_sets_calibration_store() {
    let temp = tempfile::tempdir().unwrap();
    let store = temp.path().join("from_config.toml");
    std::fs::write(
        &store,
        "threshold = 120\nopen_avg = 170.00\nclosed_avg = 60.00\nseparation = 110.00\n",
    )
    .unwrap();

    let config = temp.path().join("config.toml");
    std::fs::write(
        &config,
        format!("[calibration]\nfile = '{}'\n", store.display()),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("wake-check").unwrap();
    cmd.arg("status")
        .args(["--config-file", config.to_str().unwrap()]);

    cmd.assert()
        .code(0)
        .stdout(predicate::str::contains("\"threshold\":120"));
}
