//! Integration tests for the `epscale` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! offline inventory commands, and error handling — all without a live
//! sizing API.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `epscale` binary with env isolation.
///
/// Clears all `EPSCALE_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn epscale_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("epscale");
    cmd.env("HOME", "/tmp/epscale-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/epscale-cli-test-nonexistent")
        .env_remove("EPSCALE_PROFILE")
        .env_remove("EPSCALE_ENDPOINT")
        .env_remove("EPSCALE_TOKEN")
        .env_remove("EPSCALE_INVENTORY")
        .env_remove("EPSCALE_OUTPUT")
        .env_remove("EPSCALE_INSECURE")
        .env_remove("EPSCALE_TIMEOUT");
    cmd
}

/// Same, but with the inventory redirected into a temp dir.
fn epscale_cmd_with_inventory(dir: &tempfile::TempDir) -> assert_cmd::Command {
    let mut cmd = epscale_cmd();
    cmd.args([
        "--inventory",
        dir.path().join("inventory.toml").to_str().unwrap(),
    ]);
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = epscale_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    epscale_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("estimate")
            .and(predicate::str::contains("devices"))
            .and(predicate::str::contains("report"))
            .and(predicate::str::contains("usage")),
    );
}

#[test]
fn test_version_flag() {
    epscale_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("epscale"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    epscale_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    epscale_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Offline estimate / devices ──────────────────────────────────────

#[test]
fn test_estimate_seed_catalog() {
    let dir = tempfile::tempdir().unwrap();
    // Seed catalog: 2*50 + 10*2 + 15 + 10 + 5*3 + 2*5 + 20*0.5 = 180 EPS at x1.0.
    epscale_cmd_with_inventory(&dir)
        .arg("estimate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total EPS").and(predicate::str::contains("180")));
}

#[test]
fn test_estimate_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir)
        .args(["--output", "json", "estimate"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totalEps"].as_f64(), Some(180.0));
    assert_eq!(parsed["breakdown"].as_array().map(Vec::len), Some(6));
    assert!(parsed["dailyLogsGB"].is_number());
    assert!(parsed["monthlyLogsTB"].is_number());
}

#[test]
fn test_estimate_multiplier_override() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir)
        .args(["--output", "json-compact", "estimate", "--multiplier", "2.0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totalEps"].as_f64(), Some(360.0));
}

#[test]
fn test_devices_list_shows_seed_categories() {
    let dir = tempfile::tempdir().unwrap();
    epscale_cmd_with_inventory(&dir)
        .args(["devices", "list"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("fw")
                .and(predicate::str::contains("plc"))
                .and(predicate::str::contains("Security Devices")),
        );
}

#[test]
fn test_devices_set_count_persists() {
    let dir = tempfile::tempdir().unwrap();

    epscale_cmd_with_inventory(&dir)
        .args(["devices", "set-count", "fw", "4"])
        .assert()
        .success()
        // 180 + 2 extra firewalls at 50 EPS = 280
        .stderr(predicate::str::contains("280 EPS"));

    let output = epscale_cmd_with_inventory(&dir)
        .args(["--output", "json-compact", "estimate"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totalEps"].as_f64(), Some(280.0));
}

#[test]
fn test_devices_set_count_unknown_id() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir)
        .args(["devices", "set-count", "nope", "4"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(4), "Expected not-found exit code");
    let text = combined_output(&output);
    assert!(text.contains("nope"), "Expected the id in the error:\n{text}");
}

#[test]
fn test_devices_add_and_remove() {
    let dir = tempfile::tempdir().unwrap();

    epscale_cmd_with_inventory(&dir)
        .args([
            "devices", "add", "--id", "dns", "--name", "DNS Servers", "--type", "server",
            "--source", "syslog", "--count", "2",
        ])
        .assert()
        .success()
        .stderr(predicate::str::contains("Added category 'dns'"));

    // Recommended rate for server/syslog is 1 EPS: 180 + 2*1 = 182.
    let output = epscale_cmd_with_inventory(&dir)
        .args(["--output", "json-compact", "estimate"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totalEps"].as_f64(), Some(182.0));

    epscale_cmd_with_inventory(&dir)
        .args(["--yes", "devices", "remove", "dns"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed category 'dns'"));
}

#[test]
fn test_devices_add_duplicate_id_conflicts() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir)
        .args([
            "devices", "add", "--id", "fw", "--name", "Clash", "--type", "security",
            "--source", "syslog",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected conflict exit code");
}

#[test]
fn test_devices_reset_restores_seed() {
    let dir = tempfile::tempdir().unwrap();

    epscale_cmd_with_inventory(&dir)
        .args(["devices", "set-count", "plc", "100"])
        .assert()
        .success();

    epscale_cmd_with_inventory(&dir)
        .args(["--yes", "devices", "reset"])
        .assert()
        .success();

    let output = epscale_cmd_with_inventory(&dir)
        .args(["--output", "json-compact", "estimate"])
        .output()
        .unwrap();
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["totalEps"].as_f64(), Some(180.0));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = epscale_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_report_no_endpoint_configured() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir).arg("report").output().unwrap();
    assert_eq!(output.status.code(), Some(1), "Expected general exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("endpoint") || text.contains("config"),
        "Expected error about missing endpoint:\n{text}"
    );
}

#[test]
fn test_usage_no_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let output = epscale_cmd_with_inventory(&dir)
        .args(["--endpoint", "https://api.invalid/prod", "usage"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("credentials") || text.contains("login"),
        "Expected error about missing credentials:\n{text}"
    );
}

#[test]
fn test_usage_limit_out_of_range() {
    let output = epscale_cmd().args(["usage", "--limit", "500"]).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
}

#[test]
fn test_invalid_output_format() {
    let output = epscale_cmd()
        .args(["--output", "invalid", "estimate"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_devices_subcommands_exist() {
    epscale_cmd()
        .args(["devices", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("set-count"))
                .and(predicate::str::contains("set-rate"))
                .and(predicate::str::contains("set-multiplier"))
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("remove"))
                .and(predicate::str::contains("reset")),
        );
}

#[test]
fn test_auth_subcommands_exist() {
    epscale_cmd()
        .args(["auth", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("login")
                .and(predicate::str::contains("logout"))
                .and(predicate::str::contains("status"))
                .and(predicate::str::contains("register"))
                .and(predicate::str::contains("confirm")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    epscale_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("path")),
        );
}

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    epscale_cmd().args(["config", "show"]).assert().success();
}

#[test]
fn test_config_path_prints_path() {
    epscale_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}
