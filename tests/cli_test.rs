#![allow(deprecated)]

/// Command-line smoke tests
///
/// These run the binary with an in-memory session store so nothing touches
/// the user's data directory or a real server.
use assert_cmd::Command;
use predicates::prelude::*;
mod common;

const MEMORY_CONFIG: &str = "api:\n  base_url: http://127.0.0.1:9\nstorage:\n  backend: memory\n";

fn contactbook() -> Command {
    let mut cmd = Command::cargo_bin("contactbook").unwrap();
    cmd.env_remove("CONTACTBOOK_API_URL")
        .env_remove("CONTACTBOOK_STORAGE_BACKEND")
        .env_remove("CONTACTBOOK_STORAGE_PATH")
        .env_remove("CONTACTBOOK_PASSWORD");
    cmd
}

#[test]
fn test_help_lists_commands() {
    contactbook()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("shell"));
}

#[test]
fn test_whoami_without_token() {
    let (_dir, config_path) = common::temp_config_file(MEMORY_CONFIG);

    contactbook()
        .arg("--config")
        .arg(config_path)
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are not signed in"))
        .stdout(predicate::str::contains("Language: en"));
}

#[test]
fn test_list_without_token_fails_before_network() {
    let (_dir, config_path) = common::temp_config_file(MEMORY_CONFIG);

    contactbook()
        .arg("--config")
        .arg(config_path)
        .arg("list")
        .assert()
        .failure()
        .stdout(predicate::str::contains("You are not signed in"));
}

#[test]
fn test_register_short_password_rejected() {
    let (_dir, config_path) = common::temp_config_file(MEMORY_CONFIG);

    contactbook()
        .arg("--config")
        .arg(config_path)
        .args([
            "register",
            "--email",
            "ann@example.com",
            "--username",
            "ann",
            "--password",
            "abc",
        ])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Must be at least 5 characters"));
}

#[test]
fn test_invalid_api_url_rejected() {
    let (_dir, config_path) = common::temp_config_file(MEMORY_CONFIG);

    contactbook()
        .arg("--config")
        .arg(config_path)
        .arg("--api-url")
        .arg("ftp://example.com")
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_unknown_language_rejected() {
    let (_dir, config_path) = common::temp_config_file(MEMORY_CONFIG);

    contactbook()
        .arg("--config")
        .arg(config_path)
        .args(["language", "de"])
        .assert()
        .failure();
}
