//! Tests for the `tiny-webhook` binary startup
//!
//! Configuration problems must stop the process before it binds a port.

use assert_cmd::prelude::*;
use std::io::Write;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// The binary with a predictable console and no configuration from the environment
fn tiny_webhook() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("tiny-webhook"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    for (key, _) in std::env::vars() {
        if key.starts_with("TINY_WEBHOOK_") {
            cmd.env_remove(key);
        }
    }
    cmd
}

fn console(output: &Output) -> String {
    format!(
        "{}{}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    )
}

#[test]
fn test_empty_hook_list_exits_with_critical_error() {
    let file = config_file("http:\n  port: 8081\nhooks: []\n");

    let assert = tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1);

    let console = console(assert.get_output());
    assert!(console.contains("The list of 'hooks' in"), "{}", console);
    assert!(console.contains("is empty!"), "{}", console);
    assert!(console.contains("critical"), "{}", console);
    assert!(!console.contains("Starting tiny-webhook on port"), "{}", console);
}

#[test]
fn test_invalid_port_exits_before_binding() {
    let file = config_file("http:\n  port: 70000\nhooks:\n  - requirements: {}\n");

    let assert = tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .assert()
        .code(1);

    let console = console(assert.get_output());
    assert!(console.contains("is not a valid port (1-65535): 70000"), "{}", console);
}

#[test]
fn test_missing_config_file_exits_with_critical_error() {
    let dir = tempfile::tempdir().unwrap();

    let assert = tiny_webhook()
        .arg("--config")
        .arg(dir.path().join("missing.yaml"))
        .assert()
        .code(1);

    let console = console(assert.get_output());
    assert!(console.contains("Configuration file not found"), "{}", console);
}

#[test]
fn test_check_accepts_a_valid_configuration() {
    let file = config_file(
        "http:\n  port: 8081\n  host: 127.0.0.1\nhooks:\n  - name: push\n    requirements:\n      event: push\n",
    );

    let assert = tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .arg("--check")
        .assert()
        .success();

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).into_owned();
    assert!(
        stdout.contains("Configuration is valid: 1 hook(s), listening on 127.0.0.1:8081"),
        "{}",
        stdout
    );
}

#[test]
fn test_check_rejects_an_invalid_configuration() {
    let file = config_file("hooks:\n  - requirements: {}\n");

    tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .arg("--check")
        .assert()
        .code(1);
}

#[test]
fn test_log_level_accepts_full_directives() {
    let file = config_file("http:\n  port: 8081\nhooks:\n  - requirements: {}\n");

    tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .arg("--log-level")
        .arg("tiny_webhook=trace,tower_http=warn")
        .arg("--check")
        .assert()
        .success();

    tiny_webhook()
        .arg("--config")
        .arg(file.path())
        .arg("--log-level")
        .arg("tiny_webhook=notalevel")
        .arg("--check")
        .assert()
        .failure();
}
