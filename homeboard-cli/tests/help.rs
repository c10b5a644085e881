use assert_cmd::cargo::{self};
use predicates::str::contains;

#[test]
fn prints_help() {
    let mut cmd = cargo::cargo_bin_cmd!("homeboard");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("homeboard"))
        .stdout(contains("--widget"))
        .stdout(contains("--no-help"))
        .stdout(contains("--tick-ms"));
}

#[test]
fn requires_some_input() {
    let mut cmd = cargo::cargo_bin_cmd!("homeboard");
    cmd.assert()
        .failure()
        .stderr(contains("provide --widget"));
}

#[test]
fn widget_conflicts_with_schema() {
    let mut cmd = cargo::cargo_bin_cmd!("homeboard");
    cmd.args(["--widget", "a.json", "--schema", "b.json"])
        .assert()
        .failure()
        .stderr(contains("cannot be used with"));
}

#[test]
fn missing_widget_file_is_reported() {
    let mut cmd = cargo::cargo_bin_cmd!("homeboard");
    cmd.args(["--widget", "/nonexistent/homeboard-widget.json"])
        .assert()
        .failure()
        .stderr(contains("failed to read"));
}
