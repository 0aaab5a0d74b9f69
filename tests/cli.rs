use assert_cmd::Command;
use predicates::prelude::*;

fn meshlint() -> Command {
    let mut cmd = Command::cargo_bin("meshlint").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn list_shows_version_analyzer() {
    meshlint()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("injection.VersionAnalyzer"));
}

#[test]
fn consistent_snapshot_passes() {
    meshlint()
        .args(["analyze", "tests/fixtures/consistent.yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation issues found."));
}

#[test]
fn warnings_pass_by_default() {
    meshlint()
        .args(["analyze", "tests/fixtures/mismatch", "--color", "never"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "pods.yaml:13: Warning [IST0105] (Pod details-v1-68868454f5-abcde.bookinfo) ",
        ));
}

#[test]
fn failure_threshold_sets_exit_code() {
    meshlint()
        .args(["analyze", "tests/fixtures/mismatch", "--failure-threshold", "warning"])
        .assert()
        .code(2);

    meshlint()
        .args([
            "analyze",
            "tests/fixtures/mismatch",
            "--failure-threshold",
            "warning",
            "--no-fail",
        ])
        .assert()
        .success();
}

#[test]
fn suppression_rule_silences_finding() {
    meshlint()
        .args([
            "analyze",
            "tests/fixtures/mismatch",
            "--failure-threshold",
            "warning",
            "--suppress",
            "IST0105=Pod details-*",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("No validation issues found."));
}

#[test]
fn json_output_from_stdin() {
    let input = std::fs::read_to_string("tests/fixtures/rolling-upgrade/snapshot.yaml").unwrap();
    let output = meshlint()
        .args(["analyze", "-", "--output", "json"])
        .write_stdin(input)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(value["summary"]["total_messages"], 3);
    assert_eq!(value["messages"][0]["origin"], "<stdin>:32");
}

#[test]
fn config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("meshlint.yaml");
    std::fs::write(&config, "failureThreshold: warning\n").unwrap();

    meshlint()
        .arg("--config")
        .arg(&config)
        .args(["analyze", "tests/fixtures/mismatch"])
        .assert()
        .code(2);
}

#[test]
fn missing_config_file_is_a_runtime_error() {
    meshlint()
        .args(["--config", "does/not/exist.yaml", "analyze", "tests/fixtures/mismatch"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn missing_input_path_is_a_runtime_error() {
    meshlint()
        .args([
            "analyze",
            "does/not/exist.yaml",
            "--failure-threshold",
            "warning",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("does/not/exist.yaml"));

    meshlint()
        .args(["analyze", "tests/fixtures/consistent.yaml", "does/not/exist.yaml", "--no-fail"])
        .assert()
        .code(1);
}

#[test]
fn invalid_suppression_is_rejected() {
    meshlint()
        .args(["analyze", "tests/fixtures/mismatch", "--suppress", "IST0105"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("CODE=RESOURCE"));
}
