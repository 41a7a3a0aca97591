//! E2E tests for the `gg` binary.
//!
//! Each test runs the binary as a subprocess against an isolated temp data
//! directory via `GIGGLE_DATA_DIR`. No test touches the network: the fetch
//! loop is covered by unit and property tests in giggle-core, and the one
//! fetch invocation here asks for zero jokes.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::path::Path;
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Test Harness
// ---------------------------------------------------------------------------

/// Build a Command targeting the gg binary, with its store rooted in `dir`.
fn gg_cmd(dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("gg"));
    cmd.env("GIGGLE_DATA_DIR", dir);
    // Suppress tracing output that goes to stderr
    cmd.env("GIGGLE_LOG", "error");
    // Keep output deterministic regardless of TTY
    cmd.env_remove("FORMAT");
    cmd
}

/// Seed the store file directly with the persisted JSON shape.
fn seed_store(dir: &Path, jokes: &Value) {
    std::fs::write(dir.join("jokes.json"), jokes.to_string()).expect("seed store");
}

fn list_json(dir: &Path) -> Value {
    let output = gg_cmd(dir)
        .args(["list", "--json"])
        .output()
        .expect("list should not crash");
    assert!(
        output.status.success(),
        "list failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("list --json should produce valid JSON")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn list_on_empty_store_succeeds_with_empty_array() {
    let dir = TempDir::new().expect("temp dir");
    let json = list_json(dir.path());
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn list_orders_by_votes_descending_and_keeps_ties_stable() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([
            {"id": "a", "text": "first", "votes": 3},
            {"id": "b", "text": "second", "votes": 5},
            {"id": "c", "text": "third", "votes": 3}
        ]),
    );

    let json = list_json(dir.path());
    let ids: Vec<&str> = json
        .as_array()
        .expect("array")
        .iter()
        .map(|row| row["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids, ["b", "a", "c"]);
}

#[test]
fn list_reports_mood_banding() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([
            {"id": "a", "text": "top", "votes": 15},
            {"id": "b", "text": "bottom", "votes": -1}
        ]),
    );

    let json = list_json(dir.path());
    assert_eq!(json[0]["mood"], "rolling");
    assert_eq!(json[0]["color"], "#4CAF50");
    assert_eq!(json[1]["mood"], "angry");
    assert_eq!(json[1]["color"], "#F44336");
}

#[test]
fn corrupted_store_hydrates_as_empty_not_an_error() {
    let dir = TempDir::new().expect("temp dir");
    std::fs::write(dir.path().join("jokes.json"), "{ definitely not json [")
        .expect("write garbage");

    let json = list_json(dir.path());
    assert_eq!(json, serde_json::json!([]));
}

#[test]
fn up_then_down_restores_the_original_count() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([{"id": "a", "text": "joke", "votes": 7}]),
    );

    gg_cmd(dir.path()).args(["up", "a"]).assert().success();
    gg_cmd(dir.path()).args(["down", "a"]).assert().success();

    let json = list_json(dir.path());
    assert_eq!(json[0]["votes"], 7);
}

#[test]
fn vote_applies_arbitrary_delta_and_persists() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([{"id": "a", "text": "joke", "votes": 0}]),
    );

    let output = gg_cmd(dir.path())
        .args(["vote", "a", "--delta", "5", "--json"])
        .output()
        .expect("vote should not crash");
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["votes"], 5);
    assert_eq!(json["mood"], "neutral");
    // Exactly one framing newline after the object.
    assert!(output.stdout.ends_with(b"}\n"));
    assert!(!output.stdout.ends_with(b"\n\n"));

    // The store file reflects the vote.
    let raw = std::fs::read_to_string(dir.path().join("jokes.json")).expect("read store");
    let persisted: Value = serde_json::from_str(&raw).expect("persisted JSON");
    assert_eq!(persisted[0]["votes"], 5);
}

#[test]
fn vote_on_unknown_id_is_a_silent_noop() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([{"id": "a", "text": "joke", "votes": 1}]),
    );

    gg_cmd(dir.path())
        .args(["up", "nonexistent-id"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ignored"));

    let json = list_json(dir.path());
    assert_eq!(json.as_array().expect("array").len(), 1);
    assert_eq!(json[0]["votes"], 1);
}

#[test]
fn fetch_zero_adds_nothing_without_touching_the_network() {
    let dir = TempDir::new().expect("temp dir");

    let output = gg_cmd(dir.path())
        .args(["fetch", "-n", "0", "--json"])
        .output()
        .expect("fetch should not crash");
    assert!(
        output.status.success(),
        "fetch -n 0 failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: Value = serde_json::from_slice(&output.stdout).expect("valid JSON");
    assert_eq!(json["added"], 0);
    assert_eq!(json["total"], 0);
}

#[test]
fn list_text_mode_emits_headers_and_rows() {
    let dir = TempDir::new().expect("temp dir");
    seed_store(
        dir.path(),
        &serde_json::json!([{"id": "a", "text": "joke", "votes": 0}]),
    );

    gg_cmd(dir.path())
        .args(["list"])
        .env("FORMAT", "text")
        .assert()
        .success()
        .stdout(predicate::str::contains("ID  VOTES  MOOD  TEXT"))
        .stdout(predicate::str::contains("confused"));
}

#[test]
fn broken_config_fails_with_a_machine_code() {
    let dir = TempDir::new().expect("temp dir");
    let config_root = TempDir::new().expect("config dir");
    std::fs::create_dir_all(config_root.path().join("giggle")).expect("giggle config dir");
    std::fs::write(config_root.path().join("giggle/config.toml"), "[fetch\nbatch_size = ")
        .expect("write broken config");

    gg_cmd(dir.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .args(["list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error[E1001]"))
        .stderr(predicate::str::contains("Config file parse error"));

    // With --json the failure is a structured object on stderr.
    let output = gg_cmd(dir.path())
        .env("XDG_CONFIG_HOME", config_root.path())
        .args(["list", "--json"])
        .output()
        .expect("list should not crash");
    assert!(!output.status.success());
    let json: Value = serde_json::from_slice(&output.stderr).expect("stderr should be JSON");
    assert_eq!(json["code"], "E1001");
    assert!(json["hint"].as_str().is_some());
}

#[test]
fn completions_generate_for_bash() {
    let dir = TempDir::new().expect("temp dir");
    gg_cmd(dir.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("gg"));
}
