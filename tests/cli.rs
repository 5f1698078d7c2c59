mod common;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn islands(data_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("islands").unwrap();
    cmd.env_remove("ISLANDS_BASE_URL")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("islands").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("islands"));
}

#[test]
fn lists_regions() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args(["--no-guess", "regions"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cork").and(predicate::str::contains("Leinster")));
}

#[test]
fn focus_prints_bounds_as_json() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args(["--no-guess", "focus", "munster", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"west\": -10.5"));
}

#[test]
fn focus_on_unknown_group_prints_null() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args(["--no-guess", "focus", "Nowhere", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("null"));
}

#[test]
fn slow_taps_never_navigate() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args([
            "--no-guess",
            "click",
            "cork",
            "--touch",
            "--taps",
            "2",
            "--interval-ms",
            "900",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("preview").and(predicate::str::contains("navigate").not()));
}

#[test]
fn double_tap_navigates() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args(["click", "kerry", "--touch", "--taps", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tap 2: navigate /region/kerry"));
}

#[test]
fn geographic_styles_are_invisible() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), None);
    islands(dir.path())
        .args(["styles", "--overlay", "geographic", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"opacity\": 0.0"));
}

#[test]
fn guess_reports_framed_region() {
    let dir = tempdir().unwrap();
    common::write_data_dir(dir.path(), Some("dublin"));
    islands(dir.path())
        .arg("guess")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("dublin"));
}

#[test]
fn missing_data_fails_with_context() {
    let dir = tempdir().unwrap();
    islands(dir.path())
        .arg("regions")
        .assert()
        .failure()
        .stderr(predicate::str::contains("load region data"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn loads_from_live_backend() {
    let mut cmd = Command::cargo_bin("islands").unwrap();
    cmd.env_remove("ISLANDS_DATA_DIR").args(["regions", "--json"]);
    cmd.assert().success().stdout(predicate::str::contains("slug"));
}
