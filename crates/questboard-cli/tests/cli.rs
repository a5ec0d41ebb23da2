//! CLI smoke tests.
//!
//! Each test runs the binary with its own temporary HOME. Tests that need a
//! server start a wiremock instance and run the binary on a blocking thread.

mod common;

use std::path::PathBuf;

use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{run_cli, run_cli_failure, run_cli_success, session_file, write_session};

const USER_ID: &str = "3b241101-e2bb-4255-8caf-4136c566a962";

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "success": true,
        "code": "ok",
        "message": "",
        "data": data
    }))
}

/// Run the CLI off the async runtime so the mock server keeps serving.
async fn run_async(args: Vec<String>, home: PathBuf) -> std::process::Output {
    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &home)
    })
    .await
    .unwrap()
}

fn args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}

#[test]
fn test_help_lists_commands() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(&["--help"], home.path());
    for command in ["login", "logout", "whoami", "quests", "parties", "users", "system"] {
        assert!(stdout.contains(command), "missing {command} in help");
    }
}

#[test]
fn test_version() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(&["--version"], home.path());
    assert!(stdout.starts_with("questboard "));
}

#[test]
fn test_whoami_without_session() {
    let home = tempfile::tempdir().unwrap();
    let stderr = run_cli_failure(&["whoami"], home.path());
    assert!(stderr.contains("No active session"));
}

#[test]
fn test_logout_without_session() {
    let home = tempfile::tempdir().unwrap();
    let stdout = run_cli_success(&["logout", "--local"], home.path());
    assert!(stdout.contains("No active session"));
}

#[test]
fn test_invalid_id_rejected_locally() {
    let home = tempfile::tempdir().unwrap();
    // Port 9 is discard; nothing should be sent anyway
    write_session(home.path(), "http://127.0.0.1:9/quest-board", Some("session-token=abc"));

    let stderr = run_cli_failure(&["quests", "get", "not-a-uuid"], home.path());
    assert!(stderr.contains("Invalid quest id"));
}

#[test]
fn test_invalid_page_size_rejected_locally() {
    let home = tempfile::tempdir().unwrap();
    write_session(home.path(), "http://127.0.0.1:9/quest-board", None);

    let stderr = run_cli_failure(&["quests", "list", "--count", "5000"], home.path());
    assert!(stderr.contains("Invalid paging options"));
}

#[test]
fn test_bulk_command_needs_ids() {
    let home = tempfile::tempdir().unwrap();
    run_cli_failure(&["users", "enable"], home.path());
}

#[test]
fn test_local_logout_clears_session() {
    let home = tempfile::tempdir().unwrap();
    write_session(home.path(), "http://127.0.0.1:9/quest-board", Some("session-token=abc"));

    let stdout = run_cli_success(&["logout", "--local"], home.path());
    assert!(stdout.contains("Signed out"));
    assert!(!session_file(home.path()).exists());
}

#[tokio::test]
async fn test_login_persists_cookies() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();

    Mock::given(method("GET"))
        .and(path("/quest-board/api/v1/auth/csrf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "csrfToken": "csrf-1" })))
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/quest-board/api/v1/auth/callback/credentials"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("location", "/quest-board/user/summary")
                .insert_header("set-cookie", "session-token=abc; Path=/; HttpOnly"),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/quest-board/api/v1/user/login-session-info"))
        .and(header("cookie", "session-token=abc"))
        .respond_with(ok(json!({ "user": { "id": USER_ID, "loginId": "aria" } })))
        .mount(&server)
        .await;

    let url = format!("{}/quest-board", server.uri());
    let output = run_async(
        args(&["login", "--login-id", "aria", "--password", "hunter2", "--url", &url]),
        home.path().to_path_buf(),
    )
    .await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stored: Value = serde_json::from_str(&std::fs::read_to_string(session_file(home.path())).unwrap()).unwrap();
    assert_eq!(stored["cookies"], "session-token=abc");
    assert_eq!(stored["base_url"], url);

    // The stored cookie is sent on the next run
    let output = run_async(args(&["whoami"]), home.path().to_path_buf()).await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("aria"));
}

#[tokio::test]
async fn test_remote_failure_is_reported() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_session(home.path(), &server.uri(), Some("session-token=abc"));

    Mock::given(method("GET"))
        .and(path("/quest-board/api/v1/system/database/backups"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "success": false,
            "code": "no_permission",
            "message": "Guild staff permission required.",
            "data": null
        })))
        .mount(&server)
        .await;

    let output = run_async(args(&["system", "backups"]), home.path().to_path_buf()).await;
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to list backups"));
    assert!(stderr.contains("Guild staff permission required."));
}

#[tokio::test]
async fn test_close_quest_as_failed() {
    let server = MockServer::start().await;
    let home = tempfile::tempdir().unwrap();
    write_session(home.path(), &server.uri(), Some("session-token=abc"));

    let quest_id = "0b6c3a4e-53c4-4a9e-8d2c-0b1a5e9f3c11";
    Mock::given(method("PUT"))
        .and(path(format!("/quest-board/api/v1/quests/{quest_id}/close")))
        .and(query_param("success", "false"))
        .and(body_json(json!({})))
        .respond_with(ok(json!({
            "id": quest_id,
            "questOwnerId": USER_ID,
            "title": "Slay the dragon",
            "rank": 5,
            "status": "failed",
            "limitDate": "2025-01-01T00:00:00.000Z",
            "createdAt": "2024-12-01T00:00:00.000Z",
            "updatedAt": "2024-12-01T00:00:00.000Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let output = run_async(args(&["quests", "close", quest_id, "--failed"]), home.path().to_path_buf()).await;
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert!(String::from_utf8_lossy(&output.stdout).contains("failed"));
}
