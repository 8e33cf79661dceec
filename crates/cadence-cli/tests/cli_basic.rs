//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (exit code, stdout, stderr).
fn run_cli(args: &[&str]) -> (i32, String, String) {
    let output = Command::new("cargo")
        .args(["run", "-p", "cadence-cli", "--"])
        .args(args)
        .env("CADENCE_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (code, stdout, stderr)
}

#[test]
fn test_theme_list() {
    let (code, stdout, _) = run_cli(&["theme", "list"]);
    assert_eq!(code, 0, "theme list failed");
    assert!(stdout.contains("default"));
}

#[test]
fn test_theme_list_json_parses() {
    let (code, stdout, _) = run_cli(&["theme", "list", "--json"]);
    assert_eq!(code, 0, "theme list --json failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed["themes"].as_array().is_some());
}

#[test]
fn test_theme_show_default() {
    let (code, stdout, _) = run_cli(&["theme", "show", "default"]);
    assert_eq!(code, 0, "theme show failed");
    assert!(stdout.contains("Pour-over coffee"));
}

#[test]
fn test_theme_show_unknown_fails() {
    let (code, _, stderr) = run_cli(&["theme", "show", "no-such-theme"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_preset_roundtrip() {
    let name = "cli-test-roundtrip";
    let (code, _, _) = run_cli(&["preset", "save", name, "--steps", "Work=2,Rest=1"]);
    assert_eq!(code, 0, "preset save failed");

    let (code, stdout, _) = run_cli(&["preset", "list"]);
    assert_eq!(code, 0, "preset list failed");
    assert!(stdout.contains(name));

    let (code, stdout, _) = run_cli(&["preset", "show", name, "--json"]);
    assert_eq!(code, 0, "preset show failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert_eq!(parsed[0]["name"], "Work");
    assert_eq!(parsed[0]["seconds"], 2);

    let (code, _, _) = run_cli(&["preset", "delete", name]);
    assert_eq!(code, 0, "preset delete failed");

    let (code, _, _) = run_cli(&["preset", "show", name]);
    assert_ne!(code, 0, "deleted preset should not show");
}

#[test]
fn test_preset_show_missing_fails() {
    let (code, _, stderr) = run_cli(&["preset", "show", "cli-test-absent"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("not found"));
}

#[test]
fn test_config_get() {
    let (code, stdout, _) = run_cli(&["config", "get", "audio.beep_enabled"]);
    assert_eq!(code, 0, "config get failed");
    assert!(stdout.trim() == "true" || stdout.trim() == "false");
}

#[test]
fn test_config_set_then_get() {
    let (code, _, _) = run_cli(&["config", "set", "timer.loops", "2"]);
    assert_eq!(code, 0, "config set failed");
    let (code, stdout, _) = run_cli(&["config", "get", "timer.loops"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "2");
    let (code, _, _) = run_cli(&["config", "set", "timer.loops", "1"]);
    assert_eq!(code, 0);
}

#[test]
fn test_config_get_unknown_key_fails() {
    let (code, _, _) = run_cli(&["config", "get", "no.such.key"]);
    assert_ne!(code, 0);
}

#[test]
fn test_config_list() {
    let (code, stdout, _) = run_cli(&["config", "list"]);
    assert_eq!(code, 0, "config list failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).expect("valid JSON");
    assert!(parsed["audio"].is_object());
}

#[test]
fn test_run_completes_a_short_preset() {
    let name = "cli-test-run";
    let (code, _, _) = run_cli(&["preset", "save", name, "--steps", "Go=1"]);
    assert_eq!(code, 0, "preset save failed");

    let (code, stdout, _) = run_cli(&["run", name, "--custom", "--json"]);
    assert_eq!(code, 0, "run failed");
    assert!(stdout.contains(r#""type":"completed""#));

    let _ = run_cli(&["preset", "delete", name]);
}
