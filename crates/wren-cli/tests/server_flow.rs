//! End-to-end command tests against a mock server.

use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_credentials(home: &std::path::Path, token: &str) {
    fs::write(
        home.join("credentials.json"),
        json!({ "token": token }).to_string(),
    )
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_stores_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok-123"
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "login", "alice", "-p", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as alice"));

    let stored = fs::read_to_string(home.path().join("credentials.json")).unwrap();
    assert!(stored.contains("tok-123"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected_reports_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "login", "alice", "-p", "bad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("login failed"));

    assert!(!home.path().join("credentials.json").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_reports_identity_and_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You have logged in, alice, Role: Moderator"
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alice (role: Moderator)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_whoami_without_credential_is_guest() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "whoami"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_posts_lists_feed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [
                {
                    "id": 2,
                    "message": "second post",
                    "hashtags": ["#rust"],
                    "username": "bob",
                    "timestamp": "2026-02-11 08:00:00"
                },
                {
                    "id": 1,
                    "message": "first post",
                    "hashtags": [],
                    "username": "alice",
                    "timestamp": "2026-02-11 07:00:00"
                }
            ]
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "posts"])
        .assert()
        .success()
        .stdout(predicate::str::contains("second post"))
        .stdout(predicate::str::contains("#rust"))
        .stdout(predicate::str::contains("first post"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_posts_author_filter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "posts": [
                { "id": 2, "message": "by bob", "hashtags": [], "username": "bob",
                  "timestamp": "" },
                { "id": 1, "message": "by alice", "hashtags": [], "username": "alice",
                  "timestamp": "" }
            ]
        })))
        .mount(&server)
        .await;

    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "posts", "--author", "alice"])
        .assert()
        .success()
        .stdout(predicate::str::contains("by alice"))
        .stdout(predicate::str::contains("by bob").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_without_credential_fails_locally() {
    // No mocks mounted: the command must fail before any network call.
    let server = MockServer::start().await;
    let home = tempdir().unwrap();

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "post", "-m", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_rejects_empty_message() {
    let server = MockServer::start().await;
    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "post", "-m", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be empty"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_post_publishes_with_normalized_tags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/post"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "message": "Post created" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args([
            "--base-url",
            &server.uri(),
            "post",
            "-m",
            "hello world",
            "-t",
            "rust",
            "-t",
            "#tui",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Posted."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_denied_for_user_role() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You have logged in, alice, Role: User"
        })))
        .mount(&server)
        .await;
    // No DELETE mock: the role check must stop the request locally.

    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "delete", "42"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("role does not allow"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_allowed_for_moderator() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You have logged in, mod, Role: Moderator"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/posts/42"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Post deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "delete", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted post #42"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_account_with_yes_clears_credential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/protected"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "You have logged in, alice, Role: User"
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/delete-account"))
        .and(header("authorization", "Bearer tok-123"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "message": "Account deleted" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let home = tempdir().unwrap();
    write_credentials(home.path(), "tok-123");

    cargo_bin_cmd!("wren")
        .env("WREN_HOME", home.path())
        .args(["--base-url", &server.uri(), "delete-account", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Account alice deleted"));

    let stored = fs::read_to_string(home.path().join("credentials.json")).unwrap();
    assert!(!stored.contains("tok-123"));
}
