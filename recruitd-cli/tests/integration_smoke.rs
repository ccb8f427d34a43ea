//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_top_level_help() {
    let mut cmd = Command::cargo_bin("recruitd").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("init-db"));
}

#[test]
fn test_serve_help() {
    let mut cmd = Command::cargo_bin("recruitd").unwrap();
    cmd.arg("serve").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--jwt-key"))
        .stdout(predicate::str::contains("--db-host"))
        .stdout(predicate::str::contains("--port"));
}

#[test]
fn test_init_db_help() {
    let mut cmd = Command::cargo_bin("recruitd").unwrap();
    cmd.arg("init-db").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--database"))
        .stdout(predicate::str::contains("--statement-timeout"));
}

#[test]
fn test_serve_requires_jwt_key() {
    let mut cmd = Command::cargo_bin("recruitd").unwrap();
    cmd.env("JWT_KEY", "")
        .current_dir(std::env::temp_dir())
        .arg("serve");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("JWT_KEY not set"));
}

#[test]
fn test_unknown_command_fails() {
    let mut cmd = Command::cargo_bin("recruitd").unwrap();
    cmd.arg("migrate");

    cmd.assert().failure();
}
