//! End-to-end smoke tests for the CLI binary.
//!
//! Each test runs against its own data directory via AILA_DATA_DIR so
//! nothing touches the user's real state.

use std::path::Path;
use std::process::Command;

fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_aila-cli"))
        .env("AILA_DATA_DIR", data_dir)
        .args(args)
        .output()
        .expect("failed to execute CLI");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);
    (stdout, stderr, code)
}

fn run_cli_success(data_dir: &Path, args: &[&str]) -> String {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "CLI failed ({args:?}): {stderr}");
    stdout
}

#[test]
fn test_first_run_starts_welcome_offer() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(dir.path(), &["status"]);
    assert!(out.contains("WelcomeOfferStarted"), "got: {out}");
    assert!(out.contains("\"pending_prompt_type\": \"welcome\""), "got: {out}");
}

#[test]
fn test_export_queues_export_prompt() {
    let dir = tempfile::tempdir().unwrap();
    run_cli_success(dir.path(), &["status"]);
    let out = run_cli_success(dir.path(), &["track", "export"]);
    assert!(out.contains("PromptRequested"), "got: {out}");
    assert!(out.contains("\"prompt_type\":\"export\""), "got: {out}");

    let status = run_cli_success(dir.path(), &["prompt", "status"]);
    assert!(status.contains("\"pending_prompt_type\": \"export\""), "got: {status}");

    run_cli_success(dir.path(), &["prompt", "dismiss"]);
    let status = run_cli_success(dir.path(), &["prompt", "status"]);
    assert!(status.contains("\"is_prompt_visible\": false"), "got: {status}");
}

#[test]
fn test_referral_code_is_stable() {
    let dir = tempfile::tempdir().unwrap();
    let first = run_cli_success(dir.path(), &["referral", "code"]);
    let second = run_cli_success(dir.path(), &["referral", "code"]);
    let first = first.trim();
    assert_eq!(first, second.trim());
    assert!(first.starts_with("AILA"), "got: {first}");
    assert_eq!(first.len(), 10);
}

#[test]
fn test_ads_simulate_web_shows_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["ads", "simulate", "--events", "5", "--platform", "web"],
    );
    assert!(!out.contains("AdShown"), "got: {out}");
}

#[test]
fn test_ads_simulate_android_shows_one_ad() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_cli_success(
        dir.path(),
        &["ads", "simulate", "--events", "5", "--platform", "android"],
    );
    // Third navigation event passes the gate; the 60s interval throttles
    // the rest of the burst.
    assert_eq!(out.matches("AdShown").count(), 1, "got: {out}");
}
