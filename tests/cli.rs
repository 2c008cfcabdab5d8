//! End-to-end tests for the `gst` binary
//!
//! Every test here runs against a throwaway HOME so the real settings
//! file and keychain are never touched, and strips the GitHub
//! environment overrides so results do not depend on the host.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn gst(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("gst").unwrap();
    cmd.env("HOME", home.path())
        .env_remove("XDG_CONFIG_HOME")
        .env_remove("GITHUB_USER")
        .env_remove("GITHUB_TOKEN");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create"))
        .stdout(predicate::str::contains("auth"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_missing_subcommand_shows_usage() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn test_empty_stdin_only_rings_the_bell() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .arg("create")
        .write_stdin("")
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr("\u{7}");
}

#[test]
fn test_selected_without_paths_only_rings_the_bell() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["create", "--from", "selected"])
        .write_stdin("piped but not named on the command line")
        .assert()
        .failure()
        .code(1)
        .stderr("\u{7}");
}

#[test]
fn test_unreadable_file_is_reported() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["create", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cannot read '/no/such/file.txt'"));
}

#[test]
fn test_repeated_stdin_marker_is_rejected() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["create", "-", "-"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("can only be given once"));
}

#[test]
fn test_config_get_defaults_to_disabled_links() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["config", "get", "open-links"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Open links after publishing: disabled",
        ));
}

#[test]
fn test_config_set_round_trips_through_the_settings_file() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["config", "set", "open-links", "true"])
        .assert()
        .success()
        .stdout(predicate::str::contains("enabled"));

    gst(&home)
        .args(["config", "get", "open-links"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Open links after publishing: enabled",
        ));
}

#[test]
fn test_config_rejects_non_boolean_flag_values() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["config", "set", "open-links", "maybe"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Use 'true' or 'false'"));
}

#[test]
fn test_auth_status_on_a_fresh_machine() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["auth", "status"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not authenticated"));
}

#[test]
fn test_auth_logout_without_a_login() {
    let home = TempDir::new().unwrap();
    gst(&home)
        .args(["auth", "logout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not currently logged in."));
}

#[cfg(target_os = "linux")]
#[test]
fn test_clipboard_holder_invocation_bypasses_the_cli() {
    use gistly::core::notify::CLIPBOARD_DAEMON_ARG;

    let home = TempDir::new().unwrap();
    gst(&home)
        .arg(CLIPBOARD_DAEMON_ARG)
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());
}
