//! Integration tests for the `tramita` CLI binary.
//!
//! These tests validate argument parsing, help output, and error handling
//! without requiring a live backend.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `tramita` binary with env isolation.
///
/// Clears all `TRAMITA_*` env vars and points config/state directories at
/// a nonexistent path so tests never touch the user's real session.
fn tramita_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("tramita");
    cmd.env("HOME", "/tmp/tramita-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/tramita-cli-test-nonexistent")
        .env("XDG_DATA_HOME", "/tmp/tramita-cli-test-nonexistent")
        .env_remove("TRAMITA_API_BASE")
        .env_remove("TRAMITA_TOKEN")
        .env_remove("TRAMITA_TIMEOUT")
        .env_remove("TRAMITA_INSECURE");
    cmd
}

/// Concatenate stdout + stderr for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = tramita_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    tramita_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("gestiones")
            .and(predicate::str::contains("login"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("catalogos")),
    );
}

#[test]
fn test_version_flag() {
    tramita_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("tramita"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = tramita_cmd().arg("foobar").output().unwrap();
    assert!(!output.status.success(), "Expected failure for invalid subcommand");
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_whoami_without_session_exits_with_auth_code() {
    let output = tramita_cmd().arg("whoami").output().unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("Not signed in") || text.contains("login"),
        "Expected a sign-in hint:\n{text}"
    );
}

#[test]
fn test_login_without_token_is_a_usage_error() {
    let output = tramita_cmd().arg("login").output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("token"),
        "Expected the error to mention the token:\n{text}"
    );
}

#[test]
fn test_invalid_api_base_is_a_config_error() {
    let output = tramita_cmd()
        .args(["--api-base", "not a url", "--token", "tok", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1), "Expected general exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("api_base") || text.contains("Configuration"),
        "Expected a configuration error:\n{text}"
    );
}

#[test]
fn test_global_flags_parsing() {
    // All flags should parse; the failure should be about the missing
    // session, not about argument parsing.
    let output = tramita_cmd()
        .args(["--verbose", "--insecure", "--timeout", "5", "whoami"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(3), "Expected auth exit code");
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_list_flags_exist() {
    tramita_cmd().args(["list", "--help"]).assert().success().stdout(
        predicate::str::contains("--estado")
            .and(predicate::str::contains("--departamento"))
            .and(predicate::str::contains("--buscar"))
            .and(predicate::str::contains("--offset")),
    );
}

#[test]
fn test_new_flags_exist() {
    tramita_cmd().args(["new", "--help"]).assert().success().stdout(
        predicate::str::contains("--ministerio")
            .and(predicate::str::contains("--categoria"))
            .and(predicate::str::contains("--detalle"))
            .and(predicate::str::contains("--localidad")),
    );
}

#[test]
fn test_usuarios_subcommands_exist() {
    tramita_cmd()
        .args(["usuarios", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("create"))
                .and(predicate::str::contains("update")),
        );
}
