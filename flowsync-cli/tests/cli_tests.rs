// End-to-end runs of the `flowsync` binary against a mocked API

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A `flowsync` invocation that ignores the caller's config files and token.
fn flowsync(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("flowsync").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("FLOWSYNC_TOKEN")
        .env_remove("FLOWSYNC_API_URL")
        .env_remove("RUST_LOG")
        .arg("--no-color");
    cmd
}

/// Run a prepared command off the runtime so the mock server keeps serving.
async fn run(mut cmd: Command) -> assert_cmd::assert::Assert {
    tokio::task::spawn_blocking(move || cmd.assert())
        .await
        .unwrap()
}

#[test]
fn test_help_lists_resources() {
    let home = tempfile::tempdir().unwrap();

    flowsync(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("projects"))
        .stdout(predicate::str::contains("organizations"))
        .stdout(predicate::str::contains("notices"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_projects_list_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/projects"))
        .and(query_param("keyword", "portal"))
        .and(query_param("currentPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "projects": [
                    {"id": 21, "name": "Customer portal", "status": "IN_PROGRESS"}
                ],
                "meta": {"currentPage": 2, "pageSize": 10, "totalPages": 3, "totalCount": 21}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = flowsync(&home);
    cmd.args(["--api-url", &server.uri(), "-o", "json"])
        .args(["projects", "list", "--keyword", "portal", "--page", "2"]);
    let output = run(cmd).await.success().get_output().stdout.clone();

    let page: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(page["items"][0]["name"], "Customer portal");
    assert_eq!(page["items"][0]["status"], "IN_PROGRESS");
    assert!(page["pagination"].is_object());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_failed_delete_shows_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/notices/4"))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "Only administrators may delete notices."})),
        )
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();

    let mut cmd = flowsync(&home);
    cmd.args(["--api-url", &server.uri(), "-o", "json"])
        .args(["notices", "delete", "4", "--yes"]);

    run(cmd)
        .await
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Request failed"))
        .stderr(predicate::str::contains(
            "Only administrators may delete notices.",
        ));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_config_file_supplies_api_url() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/notices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"notices": [{"id": 1, "title": "Maintenance window", "category": "NOTICE"}]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("admin.toml");
    std::fs::write(
        &config,
        format!("api_url = \"{}\"\noutput_format = \"compact\"\n", server.uri()),
    )
    .unwrap();

    let mut cmd = flowsync(&home);
    cmd.arg("--config").arg(&config).args(["notices", "list"]);

    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Maintenance window"));
}

#[test]
fn test_links_check_rejects_malformed_url() {
    let home = tempfile::tempdir().unwrap();

    let assert = flowsync(&home)
        .args(["-o", "json", "links", "check", "exa mple.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1 link(s) could not be reached"));

    let page: Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(page["items"][0]["exists"], false);
    assert_eq!(page["items"][0]["normalized"], "https://exa mple.com");
}

#[test]
fn test_links_add_requires_both_inputs() {
    let home = tempfile::tempdir().unwrap();

    flowsync(&home)
        .args(["links", "add", "--url", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Enter both a link and a name."));
}

#[test]
fn test_zero_link_timeout_is_rejected() {
    let home = tempfile::tempdir().unwrap();
    let config = home.path().join("admin.toml");
    std::fs::write(&config, "probe_timeout_secs = 0\n").unwrap();

    flowsync(&home)
        .arg("--config")
        .arg(&config)
        .args(["links", "check", "example.com"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Probe timeout cannot be zero"));
}
