//! Integration tests for the `dt` CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

/// A `downtime` command writing to a store inside `dir`.
fn downtime(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("downtime").unwrap();
    cmd.arg("--store")
        .arg(dir.path().join("downtime.json"))
        .env("NO_COLOR", "1");
    cmd
}

fn roll_json(dir: &TempDir, args: &[&str]) -> Value {
    let output = downtime(dir)
        .args(["roll"])
        .args(args)
        .arg("--json")
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

fn dice(section: &Value) -> Vec<u64> {
    section["dice"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_u64().unwrap())
        .collect()
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_threshold_with_conditional_shows_both_sections() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["--seed", "7", "roll", "threshold", "-a", "2", "--cond", "1:Flanking"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Threshold roll")
                .and(predicate::str::contains("d20:"))
                .and(predicate::str::contains("Confirmed: 1d20 + 2d6kh"))
                .and(predicate::str::contains("Potential: 1d20 + 3d6kh"))
                .and(predicate::str::contains("+1 (Flanking) [pending]")),
        );
}

#[test]
fn roll_flat_threshold_has_no_potential() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["--seed", "1", "roll", "threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Confirmed: 1d20 []").and(predicate::str::contains("Potential").not()));
}

#[test]
fn roll_pool_json_reuses_dice() {
    let dir = TempDir::new().unwrap();
    let result = roll_json(
        &dir,
        &["pool", "--size", "3", "--cond", "2:Borrowed tools", "--seed", "11"],
    );

    assert_eq!(result["kind"], "SuccessPool");
    assert!(result["primary"].is_null());
    let confirmed = dice(&result["confirmed"]);
    let potential = dice(&result["potential"]);
    assert_eq!(confirmed.len(), 3);
    assert_eq!(potential.len(), 5);
    assert_eq!(&potential[..3], &confirmed[..]);
    assert!(result["potential"]["total"].as_i64() >= result["confirmed"]["total"].as_i64());
}

#[test]
fn roll_is_reproducible_with_seed() {
    let dir = TempDir::new().unwrap();
    let args = ["threshold", "-a", "1", "-d", "3", "--seed", "42"];
    assert_eq!(roll_json(&dir, &args), roll_json(&dir, &args));
}

#[test]
fn roll_rejects_unknown_kind() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "d100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown check kind"));
}

#[test]
fn roll_rejects_bad_conditionals() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "threshold", "--cond", "0:reason"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at least 1"));
    downtime(&dir)
        .args(["roll", "threshold", "--cond", "3: "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be blank"));
    downtime(&dir)
        .args(["roll", "pool", "--cond", "lots"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("MAGNITUDE:REASON"));
}

#[test]
fn roll_rejects_negative_pool() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "pool", "--size", "-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool size cannot be negative"));
}

#[test]
fn roll_rejects_oversized_pools() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "pool", "--size", "2000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds the maximum of 100"));
    downtime(&dir)
        .args(["roll", "threshold", "--accuracy", "4000000000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool of 4000000000 dice exceeds the maximum"));
    downtime(&dir)
        .args(["roll", "pool", "--size", "99", "--cond", "2:Extra hands"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool of 101 dice"));
}

#[test]
fn roll_rejects_flags_of_the_other_kind() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "threshold", "--size", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size does not apply to a threshold check"));
    downtime(&dir)
        .args(["roll", "pool", "-a", "1", "-d", "2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "--accuracy, --difficulty does not apply to a pool check",
        ));
}

#[test]
fn roll_does_not_touch_store() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["roll", "pool", "--size", "2"])
        .assert()
        .success();
    assert!(!dir.path().join("downtime.json").exists());
}

// ---------------------------------------------------------------------------
// actions
// ---------------------------------------------------------------------------

#[test]
fn actions_lists_preset_catalog() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .arg("actions")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Get Creative")
                .and(predicate::str::contains("Work on a Project"))
                .and(predicate::str::contains("9 actions")),
        );
}

// ---------------------------------------------------------------------------
// perform & history
// ---------------------------------------------------------------------------

#[test]
fn perform_records_history() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args([
            "--seed",
            "3",
            "perform",
            "Ash",
            "get creative",
            "-a",
            "1",
            "--notes",
            "Rebuilt the sensor mast",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ash").and(predicate::str::contains("Get Creative")));

    downtime(&dir)
        .args(["history", "ash"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Get Creative")
                .and(predicate::str::contains("Rebuilt the sensor mast"))
                .and(predicate::str::contains("1 entries")),
        );

    let output = downtime(&dir)
        .args(["history", "Ash", "--format", "json"])
        .output()
        .unwrap();
    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["action"], "Get Creative");
    assert!(entries[0]["check"]["primary"].is_u64());
}

#[test]
fn perform_checkless_action() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Vel", "Power at a Cost"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Done"));

    downtime(&dir)
        .args(["history", "Vel", "--format", "markdown"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("# Downtime: Vel")
                .and(predicate::str::contains("**Power at a Cost**")),
        );
}

#[test]
fn perform_unknown_action_records_nothing() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Ash", "Fly to the moon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown action"));

    downtime(&dir)
        .args(["history", "Ash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No history for Ash"));
}

#[test]
fn perform_invalid_pool_records_nothing() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Ash", "Work on a Project", "--size", "-2"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("pool size cannot be negative"));

    let output = downtime(&dir)
        .args(["history", "Ash", "--format", "json"])
        .output()
        .unwrap();
    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(entries.as_array().unwrap().is_empty());
}

#[test]
fn perform_checkless_action_rejects_check_flags() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Ash", "get focused", "-a", "2", "--cond", "1:Quiet room"])
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("action 'Get Focused' does not take a check")
                .and(predicate::str::contains("--accuracy, --cond")),
        );

    let output = downtime(&dir)
        .args(["history", "Ash", "--format", "json"])
        .output()
        .unwrap();
    let entries: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(entries.as_array().unwrap().is_empty());
}

#[test]
fn perform_threshold_action_rejects_size() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Ash", "Get Creative", "--size", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--size does not apply to a threshold check"));
}

#[test]
fn history_rejects_unknown_format() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["history", "Ash", "--format", "pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

// ---------------------------------------------------------------------------
// markers
// ---------------------------------------------------------------------------

#[test]
fn markers_group_entries() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["marker", "add", "Shore Leave", "-d", "After the siege"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added marker 'Shore Leave'"));

    downtime(&dir)
        .args(["perform", "Ash", "Get Focused"])
        .assert()
        .success();

    downtime(&dir)
        .args(["marker", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Shore Leave (current)")
                .and(predicate::str::contains("After the siege")),
        );

    downtime(&dir)
        .args(["history", "Ash", "--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Shore Leave ---"));
}

#[test]
fn marker_list_empty() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["marker", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No markers yet"));
}

#[test]
fn perform_with_unknown_marker_fails() {
    let dir = TempDir::new().unwrap();
    downtime(&dir)
        .args(["perform", "Ash", "Get Focused", "--marker", "Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("marker not found"));
}
