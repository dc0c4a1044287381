//! End-to-end tests for the spotter binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn spotter(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("spotter").unwrap();
    cmd.env("SPOTTER_HOME", home.path())
        .env("NO_COLOR", "1")
        .env_remove("SPOTTER_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    spotter(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("start"))
        .stdout(predicate::str::contains("history"));
}

#[test]
fn test_plan_show_is_stable() {
    let home = TempDir::new().unwrap();
    let first = spotter(&home)
        .args(["-o", "json", "plan", "show", "--split", "legs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"routine\""))
        .get_output()
        .stdout
        .clone();

    spotter(&home)
        .args(["-o", "json", "plan", "show", "--split", "legs"])
        .assert()
        .success()
        .stdout(predicate::eq(first));
}

#[test]
fn test_status_without_workout_fails() {
    let home = TempDir::new().unwrap();
    spotter(&home)
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active workout"));
}

#[test]
fn test_cancel_without_workout_fails() {
    let home = TempDir::new().unwrap();
    spotter(&home)
        .args(["cancel", "--force"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No active workout"));
}

#[test]
fn test_second_start_is_rejected() {
    let home = TempDir::new().unwrap();
    spotter(&home).arg("start").assert().success();
    spotter(&home)
        .args(["start", "--split", "abs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already in progress"));
}

#[test]
fn test_cancel_requires_force() {
    let home = TempDir::new().unwrap();
    spotter(&home).arg("start").assert().success();
    spotter(&home)
        .arg("cancel")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
    spotter(&home)
        .args(["cancel", "--force"])
        .assert()
        .success()
        .stdout(predicate::str::contains("discarded"));
    spotter(&home).arg("status").assert().failure();
}

#[test]
fn test_second_running_set_is_rejected() {
    let home = TempDir::new().unwrap();
    spotter(&home).arg("start").assert().success();
    spotter(&home).args(["set", "start", "1"]).assert().success();
    spotter(&home)
        .args(["set", "start", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already active"));
}

#[test]
fn test_set_zero_is_rejected() {
    let home = TempDir::new().unwrap();
    spotter(&home).arg("start").assert().success();
    spotter(&home).args(["set", "start", "0"]).assert().failure();
}

#[test]
fn test_workout_round_trip_to_history() {
    let home = TempDir::new().unwrap();

    spotter(&home)
        .args(["start", "--split", "push"])
        .assert()
        .success()
        .stdout(predicate::str::contains("workout started"));

    spotter(&home)
        .args(["set", "start", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("started"));

    spotter(&home)
        .args(["set", "log", "1", "--weight", "60", "--reps", "8", "--rpe", "8"])
        .assert()
        .success()
        .stdout(predicate::str::contains("60"));

    spotter(&home)
        .args(["-o", "json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"workout_id\""));

    spotter(&home)
        .args(["set", "finish", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("finished"));

    spotter(&home)
        .args(["finish", "--notes", "Felt strong"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout logged successfully"));

    spotter(&home).arg("status").assert().failure();

    spotter(&home)
        .arg("history")
        .assert()
        .success()
        .stdout(predicate::str::contains("Workout history (1 workouts)"));

    spotter(&home)
        .args(["history", "--id", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Felt strong"));
}

#[test]
fn test_history_missing_id_fails() {
    let home = TempDir::new().unwrap();
    spotter(&home)
        .args(["history", "--id", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Workout log #42"));
}

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    spotter(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("spotter"));
}
