//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary with HOME pointed at a scratch directory so
//! the user's own config never leaks in.

use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(home: &TempDir, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_lovecard"))
        .args(args)
        .env("HOME", home.path())
        .env_remove("LOVECARD_ENV")
        .env_remove("LOVECARD_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn home() -> TempDir {
    tempfile::tempdir().expect("tempdir")
}

#[test]
fn test_countdown_one_hour_before_target() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["countdown", "--at", "2026-12-30T23:00:00"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "00 01 00 00");
}

#[test]
fn test_countdown_after_target_prints_message() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["countdown", "--at", "2027-01-02T00:00:00"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "Time's up!");
}

#[test]
fn test_countdown_json() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["countdown", "--at", "2026-12-29T00:00:00", "--json"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(stdout.trim()).unwrap();
    assert_eq!(parsed["type"], "countdown_ticked");
    assert_eq!(parsed["remaining"]["days"], 2);
}

#[test]
fn test_countdown_rejects_bad_instant() {
    let home = home();
    let (_, stderr, code) = run_cli(&home, &["countdown", "--at", "tomorrow"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("invalid instant"));
}

#[test]
fn test_anniversary_uses_configured_start() {
    let home = home();
    let (_, _, code) = run_cli(
        &home,
        &["config", "set", "anniversary.start", "2026-01-31T00:00:00"],
    );
    assert_eq!(code, 0);
    let (stdout, _, code) = run_cli(&home, &["anniversary", "--at", "2026-03-01T01:02:03"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1 months 01 days 01:02:03");
}

#[test]
fn test_quiz_all_matches() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["quiz", "--json"]);
    assert_eq!(code, 0);
    let questions: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let picks: Vec<&str> = questions
        .as_array()
        .unwrap()
        .iter()
        .map(|q| if q["options"][0]["is_match"] == true { "a" } else { "b" })
        .collect();

    let (stdout, _, code) = run_cli(&home, &["quiz", "--answers", &picks.join(",")]);
    assert_eq!(code, 0);
    assert!(stdout.contains("You matched 5 out of 5 answers"));
    assert!(stdout.contains("Mind reader!"));
}

#[test]
fn test_quiz_wrong_answer_count() {
    let home = home();
    let (_, stderr, code) = run_cli(&home, &["quiz", "--answers", "a,b"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("expected 5 answers"));
}

#[test]
fn test_config_get_default_target() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["config", "get", "countdown.target"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2026-12-31T00:00:00");
}

#[test]
fn test_config_set_rejects_invalid_target() {
    let home = home();
    let (_, stderr, code) = run_cli(&home, &["config", "set", "countdown.target", "someday"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("countdown.target"));
    let (stdout, _, _) = run_cli(&home, &["config", "get", "countdown.target"]);
    assert_eq!(stdout.trim(), "2026-12-31T00:00:00");
}

#[test]
fn test_config_list_and_check() {
    let home = home();
    let (stdout, _, code) = run_cli(&home, &["config", "list"]);
    assert_eq!(code, 0);
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(parsed["reveal"]["panels"].is_array());

    let (stdout, _, code) = run_cli(&home, &["config", "check"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "ok");
}

#[test]
fn test_play_opens_envelope_and_quits() {
    let home = home();
    let mut child = Command::new(env!("CARGO_BIN_EXE_lovecard"))
        .args(["play", "--mute"])
        .env("HOME", home.path())
        .env_remove("LOVECARD_ENV")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn CLI");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"open\nstatus\nquit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout.contains("The envelope opens"));
    assert!(stdout.contains("panel:       1/4"));
    assert!(stdout.contains("bye"));
}
