//! CLI integration tests for the kvsession command-line interface.
//!
//! These tests verify:
//! - Help text and argument parsing
//! - Session commands against the in-process cache (`--memory`)
//! - Config errors are reported before any connection is attempted
//!
//! Note: These tests do not require a running Redis server.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get a command for the kvsession binary, isolated from local config files.
fn kvsession(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kvsession").unwrap();
    cmd.current_dir(dir.path())
        .env("KVSESSION_CONFIG_DIR", dir.path())
        .env_remove("KVSESSION_CONFIG")
        .env_remove("KVSESSION_REDIS_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

// ─────────────────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_help_lists_subcommands() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("exists"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("watch"));
}

#[test]
fn test_version_displays() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("kvsession"));
}

#[test]
fn test_create_requires_login() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "create", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("<LOGIN>"));
}

#[test]
fn test_unknown_subcommand_rejected() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir).arg("frobnicate").assert().failure();
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Commands (in-process cache)
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_memory_status_connected() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connected\": true"))
        .stdout(predicate::str::contains("\"address\": \"memory\""));
}

#[test]
fn test_memory_create_reports_added() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "--json", "create", "abc", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"added\": true"));
}

#[test]
fn test_memory_exists_absent() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "exists", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session abc not found"));
}

#[test]
fn test_memory_login_absent_fails() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "login", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("session abc not found"));
}

#[test]
fn test_memory_delete_absent_succeeds() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "--json", "delete", "abc"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"deleted\": true"));
}

#[test]
fn test_memory_watch_reports_initial_state() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "--json", "watch", "--for-secs", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connected\":true"));
}

#[test]
fn test_memory_create_human_output() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "create", "abc", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Session abc created for alice"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Unreachable Cache
// ─────────────────────────────────────────────────────────────────────────────

/// Write a project config pointing at a port nothing listens on.
fn write_unreachable_config(dir: &TempDir) {
    std::fs::write(
        dir.path().join("kvsession.toml"),
        "[redis]\naddress = \"127.0.0.1:1\"\n",
    )
    .unwrap();
}

#[test]
fn test_status_reports_unreachable_cache() {
    let dir = TempDir::new().unwrap();
    write_unreachable_config(&dir);

    kvsession(&dir)
        .args(["--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"connected\": false"))
        .stdout(predicate::str::contains("\"error\""));
}

#[test]
fn test_session_command_fails_on_unreachable_cache() {
    let dir = TempDir::new().unwrap();
    write_unreachable_config(&dir);

    kvsession(&dir)
        .args(["exists", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("connecting to session cache"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_project_config_is_applied() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kvsession.toml"),
        "[session]\nttl_secs = 120\n",
    )
    .unwrap();

    kvsession(&dir)
        .args(["--memory", "--json", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"session_ttl_secs\": 120"));
}

#[test]
fn test_invalid_config_value_fails() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kvsession.toml"),
        "[redis]\nprobe_interval_secs = 0\n",
    )
    .unwrap();

    kvsession(&dir)
        .args(["--memory", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("probe_interval_secs"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let dir = TempDir::new().unwrap();
    kvsession(&dir)
        .args(["--memory", "--config", "missing.toml", "status"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing.toml"));
}

#[test]
fn test_oversized_ttl_is_rejected() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("kvsession.toml"),
        "[session]\nttl_secs = 9223372036854775807\n",
    )
    .unwrap();

    kvsession(&dir)
        .args(["--memory", "create", "abc", "alice"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("session.ttl_secs"));
}
