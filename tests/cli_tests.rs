#![cfg(unix)]

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::process::Command;

mod common;

use common::{ECHO_KEYS_ENV, ECHO_KEYS_SCRIPT, setup_test_environment, write_env_file, write_manifest, write_script};

/// `run` replays the child's streams and exits with its exit code.
#[test]
fn test_run_replays_output_and_exit_code() {
    let dir = setup_test_environment();
    let bin = write_script(dir.path(), "bin", ECHO_KEYS_SCRIPT);
    let env = write_env_file(dir.path(), "env", ECHO_KEYS_ENV);

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run").arg("--env-file").arg(&env).arg(&bin).arg("arg1");

    cmd.assert()
        .code(42)
        .stdout("VALUE1\n")
        .stderr(predicate::str::starts_with("VALUE2\n"))
        .stderr(predicate::str::contains("[exit code: 42]"));
}

#[test]
fn test_run_quiet_omits_trailer() {
    let dir = setup_test_environment();
    let bin = write_script(dir.path(), "bin", "echo err >&2\n");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run").arg("--quiet").arg(&bin);

    cmd.assert().success().stderr("err\n");
}

#[test]
fn test_run_passes_hyphenated_arguments() {
    let dir = setup_test_environment();
    let bin = write_script(dir.path(), "bin", "echo \"$@\"\n");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run").arg("-q").arg("--").arg(&bin).arg("--flag").arg("-x");

    cmd.assert().success().stdout("--flag -x\n");
}

/// Validation failures are reported as errors with a failing exit status.
#[test]
fn test_run_non_executable_binary_fails() {
    let dir = setup_test_environment();
    let bin = common::write_file_with_mode(dir.path(), "bin", "#!/bin/sh\nexit 0\n", 0o644);

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run").arg(&bin);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("is not executable"));
}

#[test]
fn test_run_missing_env_file_fails() {
    let dir = setup_test_environment();
    let bin = write_script(dir.path(), "bin", "exit 0\n");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run")
        .arg("--env-file")
        .arg(dir.path().join("missing.env"))
        .arg(&bin);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("error verifying environment file at"));
}

#[test]
fn test_run_writes_json_report() {
    let dir = setup_test_environment();
    let bin = write_script(dir.path(), "bin", "echo hello\nexit 5\n");
    let report = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run").arg("--report").arg(&report).arg(&bin).arg("a");

    cmd.assert().code(5);

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["exit_code"], 5);
    assert_eq!(json["stdout"], "hello\n");
    assert_eq!(json["args"], serde_json::json!(["a"]));
    assert!(json["env_file"].is_null());
    assert!(json["generated_at"].is_string());
}

#[test]
fn test_batch_all_pass() {
    let dir = setup_test_environment();
    write_script(dir.path(), "keys.sh", ECHO_KEYS_SCRIPT);
    write_env_file(dir.path(), "keys.env", ECHO_KEYS_ENV);
    write_script(dir.path(), "ok.sh", "exit 0\n");
    let manifest = write_manifest(
        dir.path(),
        r#"
[[jobs]]
name = "keys"
executable = "keys.sh"
env_file = "keys.env"
expected_exit_code = 42

[[jobs]]
name = "ok"
executable = "ok.sh"
"#,
    );

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("batch").arg("--config").arg(&manifest);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--- Batch Summary ---"))
        .stdout(predicate::str::contains("ALL JOBS PASSED"));
}

#[test]
fn test_batch_unexpected_failure() {
    let dir = setup_test_environment();
    write_script(dir.path(), "bad.sh", "echo oops\nexit 9\n");
    let manifest = write_manifest(
        dir.path(),
        r#"
[[jobs]]
name = "bad"
executable = "bad.sh"
"#,
    );
    let report = dir.path().join("batch.json");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("batch")
        .arg("-c")
        .arg(&manifest)
        .arg("-j")
        .arg("1")
        .arg("--report")
        .arg(&report);

    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("UNEXPECTED FAILURE DETECTED"))
        .stdout(predicate::str::contains("expected exit code 0"))
        .stdout(predicate::str::contains("oops"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(json["jobs"][0]["status"], "unexpected_exit_code");
    assert_eq!(json["jobs"][0]["exit_code"], 9);
    assert!(json["jobs"][0]["duration_ms"].is_u64());
}

#[test]
fn test_batch_invalid_manifest() {
    let dir = setup_test_environment();
    let manifest = write_manifest(dir.path(), "[[jobs]\nname = \"broken\"\n");

    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("batch").arg("--config").arg(&manifest);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load batch manifest"));
}

#[test]
fn test_run_without_executable_is_usage_error() {
    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.arg("run");

    cmd.assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("EXECUTABLE"));
}

#[test]
fn test_no_subcommand_shows_help() {
    let mut cmd = Command::cargo_bin("envrunner").unwrap();
    cmd.assert().failure();
}
