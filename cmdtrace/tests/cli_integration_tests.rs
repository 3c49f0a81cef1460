// cmdtrace/tests/cli_integration_tests.rs
//! Command-line integration tests for the `cmdtrace` binary.
//!
//! Every test runs the binary inside a temporary project directory so the
//! consent file and manifest are isolated. The analytics endpoint is pointed
//! at a local `mockito` server, so no test ever reaches the real endpoint.

use anyhow::Result;
use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

const MASK: &str = "*****";

fn cmdtrace(project_dir: &Path, endpoint: &str) -> Command {
    let mut cmd = Command::cargo_bin("cmdtrace").unwrap();
    cmd.current_dir(project_dir)
        .env("CMDTRACE_ENDPOINT", endpoint)
        .env("HEAP_APPID_DEV", "test-app")
        .env("CMDTRACE_HOSTNAME", "test-host")
        .env("USER", "tester")
        .env_remove("CMDTRACE_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// A project directory with a manifest and, optionally, a recorded consent.
fn project(consent: Option<bool>) -> Result<TempDir> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("Cargo.toml"),
        "[package]\nname = \"dummy-project\"\nversion = \"0.2.0\"\n",
    )?;
    if let Some(consent) = consent {
        fs::write(dir.path().join(".telemetry"), format!("consent: {}\n", consent))?;
    }
    Ok(dir)
}

const UNREACHABLE: &str = "http://127.0.0.1:9/api/track";

#[test]
fn test_mask_with_vocabulary() -> Result<()> {
    let dir = tempdir()?;
    cmdtrace(dir.path(), UNREACHABLE)
        .args(["mask", "--", "consent", "show", "--config", "/home/me/secret.yml", "--format=yaml"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("consent show --config {m} --format {m}\n", m = MASK)));
    Ok(())
}

#[test]
fn test_mask_heuristic() -> Result<()> {
    let dir = tempdir()?;
    cmdtrace(dir.path(), UNREACHABLE)
        .args(["mask", "--heuristic", "--", "run", "--pipeline", "secret_pipe", "--env=prod", "node_a"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("run --pipeline {m} --env {m} node_a\n", m = MASK)));
    Ok(())
}

#[test]
fn test_structure_raw_json() -> Result<()> {
    let dir = tempdir()?;
    let output = cmdtrace(dir.path(), UNREACHABLE).args(["structure"]).output()?;
    assert!(output.status.success());

    let structure: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    let root = &structure["cmdtrace"];
    assert!(root["mask"]["--heuristic"].is_null());
    assert!(root["mask"].get("--heuristic").is_some());
    assert!(root["consent"]["grant"].get("--help").is_some());
    assert!(root["structure"].get("--help-text").is_some());
    Ok(())
}

#[test]
fn test_structure_help_text_yaml() -> Result<()> {
    let dir = tempdir()?;
    cmdtrace(dir.path(), UNREACHABLE)
        .args(["structure", "--help-text", "--format", "yaml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("mask:"));
    Ok(())
}

#[test]
fn test_consent_grant_and_show() -> Result<()> {
    let dir = tempdir()?;
    cmdtrace(dir.path(), UNREACHABLE)
        .args(["consent", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consent: not recorded"));

    cmdtrace(dir.path(), UNREACHABLE).args(["consent", "grant"]).assert().success();
    let recorded = fs::read_to_string(dir.path().join(".telemetry"))?;
    assert!(recorded.contains("consent: true"));

    cmdtrace(dir.path(), UNREACHABLE)
        .args(["consent", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consent: given"));

    cmdtrace(dir.path(), UNREACHABLE).args(["consent", "revoke"]).assert().success();
    let recorded = fs::read_to_string(dir.path().join(".telemetry"))?;
    assert!(recorded.contains("consent: false"));
    Ok(())
}

#[test]
fn test_events_are_sent_masked_with_consent() -> Result<()> {
    let mut server = mockito::Server::new();
    let per_command = server
        .mock("POST", "/api/track")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "app_id": "test-app",
            "event": "Command run: mask",
            "properties": {
                "command": format!("cmdtrace mask {m} {m} {m}", m = MASK),
                "project_version": "0.2.0"
            }
        })))
        .with_status(200)
        .expect(1)
        .create();
    let generic = server
        .mock("POST", "/api/track")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "event": "CLI command",
            "properties": {"main_command": "mask"}
        })))
        .with_status(200)
        .expect(1)
        .create();

    let dir = project(Some(true))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .args(["mask", "--", "run", "customer_secret"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("{m} {m}\n", m = MASK)));

    per_command.assert();
    generic.assert();
    Ok(())
}

#[test]
fn test_raw_values_never_reach_endpoint() -> Result<()> {
    let mut server = mockito::Server::new();
    let leaked = server
        .mock("POST", "/api/track")
        .match_body(Matcher::Regex("customer_secret".to_string()))
        .expect(0)
        .create();
    let _accepted = server.mock("POST", "/api/track").with_status(200).create();

    let dir = project(Some(true))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .args(["mask", "--heuristic", "--", "--pipeline=customer_secret"])
        .assert()
        .success();

    leaked.assert();
    Ok(())
}

#[test]
fn test_opted_out_project_sends_nothing() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/track").expect(0).create();

    let dir = project(Some(false))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .args(["mask", "run"])
        .assert()
        .success()
        .stderr(predicate::str::contains("opted out"));

    mock.assert();
    Ok(())
}

#[test]
fn test_endpoint_failure_does_not_fail_command() -> Result<()> {
    let mut server = mockito::Server::new();
    let _mock = server.mock("POST", "/api/track").with_status(500).create();

    let dir = project(Some(true))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .args(["consent", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consent: given"));
    Ok(())
}

#[test]
fn test_missing_consent_without_terminal_sends_nothing() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server.mock("POST", "/api/track").expect(0).create();

    let dir = project(None)?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .args(["mask", "run"])
        .assert()
        .success();

    mock.assert();
    assert!(!dir.path().join(".telemetry").exists());
    Ok(())
}

#[test]
fn test_unreadable_config_falls_back_to_defaults() -> Result<()> {
    let dir = project(Some(true))?;
    cmdtrace(dir.path(), UNREACHABLE)
        .env("CMDTRACE_CONFIG", dir.path().join("missing").join("telemetry.yml"))
        .args(["consent", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("consent: given"))
        .stderr(predicate::str::contains("Ignoring telemetry config"));

    fs::write(dir.path().join("broken.yml"), "endpoint: [not, a, string\n")?;
    cmdtrace(dir.path(), UNREACHABLE)
        .args(["--config", "broken.yml", "mask", "--", "consent", "secret"])
        .assert()
        .success()
        .stdout(predicate::str::diff(format!("consent {}\n", MASK)));
    Ok(())
}

#[test]
fn test_version_flag_is_reported() -> Result<()> {
    let mut server = mockito::Server::new();
    let per_command = server
        .mock("POST", "/api/track")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "event": "Command run: --version",
            "properties": {"command": "cmdtrace --version"}
        })))
        .with_status(200)
        .expect(1)
        .create();
    let generic = server
        .mock("POST", "/api/track")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "event": "CLI command",
            "properties": {"main_command": "--version"}
        })))
        .with_status(200)
        .expect(1)
        .create();

    let dir = project(Some(true))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("cmdtrace "));

    per_command.assert();
    generic.assert();
    Ok(())
}

#[test]
fn test_usage_error_is_reported_and_still_fails() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/track")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "properties": {"command": format!("cmdtrace {}", MASK)}
        })))
        .with_status(200)
        .expect(2)
        .create();

    let dir = project(Some(true))?;
    cmdtrace(dir.path(), &format!("{}/api/track", server.url()))
        .arg("not-a-command")
        .assert()
        .failure()
        .code(2);

    mock.assert();
    Ok(())
}
