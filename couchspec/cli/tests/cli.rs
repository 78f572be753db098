use std::fs;
use std::net::TcpListener;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The binary with connection settings cleared from the environment.
fn couchspec() -> Command {
    let mut cmd = cargo_bin_cmd!("couchspec");
    cmd.env_remove("COUCHDB_URL")
        .env_remove("COUCHDB_USER")
        .env_remove("COUCHDB_PASSWORD")
        .env_remove("RUST_LOG");
    cmd
}

async fn couchdb() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "couchdb": "Welcome", "version": "3.3.0" })),
        )
        .mount(&server)
        .await;
    server
}

fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}

// ============================================================================
// Help and argument parsing
// ============================================================================

#[test]
fn test_help_flag() {
    couchspec()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generate OpenAPI spec for CouchDB"))
        .stdout(predicate::str::contains("--url"))
        .stdout(predicate::str::contains("--format"));
}

#[test]
fn test_rejects_unknown_format() {
    couchspec()
        .args(["--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("xml"));
}

// ============================================================================
// Failure exits
// ============================================================================

#[test]
fn test_refused_connection_exits_1_without_writing() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("couchdb-openapi.json");

    couchspec()
        .args(["--url", &closed_port_url(), "--timeout", "5"])
        .arg("--output")
        .arg(&output)
        .assert()
        .code(1)
        .stdout(predicate::str::contains("Generating OpenAPI specification for CouchDB..."))
        .stderr(predicate::str::starts_with("Error connecting to CouchDB:"));

    assert!(!output.exists());
}

#[test]
fn test_refused_connection_leaves_existing_file_untouched() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("existing.json");
    fs::write(&output, "previous contents").unwrap();

    couchspec()
        .args(["--url", &closed_port_url()])
        .arg("-o")
        .arg(&output)
        .assert()
        .code(1);

    assert_eq!(fs::read_to_string(&output).unwrap(), "previous contents");
}

#[test]
fn test_invalid_url_is_connectivity_error() {
    couchspec()
        .args(["--url", "not a url"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Error connecting to CouchDB"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_server_error_exits_1() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401).set_body_string(r#"{"error":"unauthorized"}"#))
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    couchspec()
        .args(["--url", &server.uri()])
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("401"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unwritable_output_exits_1() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let blocker = dir.path().join("blocker");
    fs::write(&blocker, "a file").unwrap();

    couchspec()
        .args(["--url", &server.uri()])
        .arg("-o")
        .arg(blocker.join("out.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::starts_with("Error saving file:"));
}

// ============================================================================
// Successful generation
// ============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn test_writes_json_document() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("couchdb-openapi.json");

    couchspec()
        .args(["--url", &server.uri()])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Generating OpenAPI specification for CouchDB..."))
        .stdout(predicate::str::contains(format!(
            "OpenAPI spec saved to: {}",
            output.display()
        )));

    let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["openapi"], "3.0.0");
    assert_eq!(doc["info"]["version"], "3.3.0");
    assert_eq!(doc["servers"][0]["url"], server.uri());
    assert_eq!(doc["security"], json!([{ "basicAuth": [] }]));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_credentials_from_environment() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "version": "3.3.0" })))
        .expect(1)
        .mount(&server)
        .await;
    let dir = TempDir::new().unwrap();

    couchspec()
        .env("COUCHDB_URL", server.uri())
        .env("COUCHDB_USER", "admin")
        .env("COUCHDB_PASSWORD", "secret")
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .assert()
        .success();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_lone_username_probes_unauthenticated() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();

    couchspec()
        .args(["--url", &server.uri(), "-u", "admin"])
        .arg("-o")
        .arg(dir.path().join("out.json"))
        .assert()
        .success();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[cfg(feature = "yaml")]
#[tokio::test(flavor = "multi_thread")]
async fn test_yaml_output_swaps_extension() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();

    couchspec()
        .args(["--url", &server.uri(), "--format", "yaml"])
        .arg("-o")
        .arg(dir.path().join("couchdb-openapi.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("couchdb-openapi.yaml"));

    let text = fs::read_to_string(dir.path().join("couchdb-openapi.yaml")).unwrap();
    assert!(text.contains("openapi: 3.0.0") || text.contains("openapi: '3.0.0'"));
    assert!(!dir.path().join("couchdb-openapi.json").exists());
}

#[cfg(not(feature = "yaml"))]
#[tokio::test(flavor = "multi_thread")]
async fn test_yaml_without_encoder_falls_back_to_json() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let requested = dir.path().join("api.yaml");
    let written = dir.path().join("api.json");

    couchspec()
        .args(["--url", &server.uri(), "-f", "yaml"])
        .arg("-o")
        .arg(&requested)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "YAML encoder not available. Falling back to JSON format.",
        ))
        .stdout(predicate::str::contains(format!(
            "OpenAPI spec saved to: {}",
            written.display()
        )));

    let doc: Value = serde_json::from_str(&fs::read_to_string(&written).unwrap()).unwrap();
    assert_eq!(doc["info"]["version"], "3.3.0");
    assert!(!requested.exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_explicit_json_keeps_requested_path() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("api.yaml");

    couchspec()
        .args(["--url", &server.uri(), "-f", "json"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Falling back").not());

    let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["openapi"], "3.0.0");
    assert!(!dir.path().join("api.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_openapi_version_override() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    couchspec()
        .args(["--url", &server.uri(), "--openapi-version", "3.0.3"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let doc: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(doc["openapi"], "3.0.3");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_dry_run_prints_document_only() {
    let server = couchdb().await;
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("out.json");

    let assert = couchspec()
        .args(["--url", &server.uri(), "--dry-run"])
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let doc: Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(doc["info"]["title"], "CouchDB API");
    assert!(!output.exists());
}
