//! Integration tests for the `sonarr-provider` binary.
//!
//! Argument parsing, type listing, configuration errors and one round trip
//! against a mocked server.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// The binary with `SONARR_*` cleared and config dirs pointed nowhere, so
/// tests never read the user's real configuration.
fn provider_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("sonarr-provider");
    cmd.env("HOME", "/tmp/sonarr-provider-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/sonarr-provider-test-nonexistent")
        .env_remove("SONARR_URL")
        .env_remove("SONARR_API_KEY")
        .env_remove("SONARR_EXTRA_HEADER_NAME")
        .env_remove("SONARR_EXTRA_HEADER_VALUE")
        .env_remove("SONARR_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Points at a closed port; only for commands that never send a request.
fn offline_cmd() -> assert_cmd::Command {
    let mut cmd = provider_cmd();
    cmd.args(["--url", "http://127.0.0.1:9", "--api-key", "test-key"]);
    cmd
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = provider_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage"));
}

#[test]
fn test_help_lists_operations() {
    provider_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("create")
            .and(predicate::str::contains("import"))
            .and(predicate::str::contains("data")),
    );
}

// ── Types ───────────────────────────────────────────────────────────

#[test]
fn test_types_lists_resources_and_data_sources() {
    provider_cmd().arg("types").assert().success().stdout(
        predicate::str::contains("sonarr_download_client_qbittorrent")
            .and(predicate::str::contains("sonarr_host"))
            .and(predicate::str::contains("sonarr_download_clients"))
            .and(predicate::str::contains("data_source")),
    );
}

#[test]
fn test_types_filter() {
    provider_cmd()
        .args(["types", "--resources"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sonarr_custom_format_condition_size").not());
}

// ── Configuration errors ────────────────────────────────────────────

#[test]
fn test_missing_url_is_a_config_error() {
    provider_cmd()
        .args(["--api-key", "k", "import", "sonarr_tag", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("url"));
}

#[test]
fn test_malformed_header_flag() {
    offline_cmd()
        .args(["--header", "no-equals-sign", "import", "sonarr_tag", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("NAME=VALUE"));
}

#[test]
fn test_config_masks_api_key() {
    provider_cmd()
        .args(["--url", "http://sonarr:8989", "--api-key", "very-secret", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("***").and(predicate::str::contains("very-secret").not()));
}

#[test]
fn test_unknown_type() {
    offline_cmd()
        .args(["import", "sonarr_nope", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("sonarr_nope"));
}

// ── Local data sources ──────────────────────────────────────────────

#[test]
fn test_condition_data_source_runs_offline() {
    let output = offline_cmd()
        .args(["data", "sonarr_custom_format_condition_release_title"])
        .write_stdin(r#"{"name": "x265", "required": true, "value": "x265"}"#)
        .output()
        .unwrap();

    assert!(output.status.success());
    let state: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state["implementation"], "ReleaseTitleSpecification");
}

// ── Server round trip ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_create_tag_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v3/tag"))
        .and(body_partial_json(json!({"label": "hd"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 3, "label": "hd"})))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        provider_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "create", "sonarr_tag"])
            .write_stdin(r#"{"label": "hd"}"#)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(
        output.status.success(),
        "{}",
        String::from_utf8_lossy(&output.stderr)
    );
    let state: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(state, json!({"id": 3, "label": "hd"}));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_nonzero() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v3/tag"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        provider_cmd()
            .args(["--url", &uri, "--api-key", "test-key", "data", "sonarr_tag"])
            .write_stdin(r#"{"label": "absent"}"#)
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Data Source Error"), "{stderr}");
}
