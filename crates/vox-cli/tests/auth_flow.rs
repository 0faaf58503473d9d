//! Integration tests for login/register/logout commands.

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn auth_response(token: &str, username: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "access_token": token,
        "user": {"id": 1, "username": username}
    }))
}

/// Test: login stores the session file with the returned token.
#[tokio::test]
async fn test_login_stores_session() {
    let temp = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(
            serde_json::json!({"username": "ada", "password": "pw"}),
        ))
        .respond_with(auth_response("tok-abc", "ada"))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .env("VOX_API_URL", server.uri())
        .args(["login", "--username", "ada", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged in as ada"));

    let session_path = temp.path().join("session.json");
    assert!(session_path.exists(), "session.json should exist");
    let contents = std::fs::read_to_string(&session_path).unwrap();
    assert!(contents.contains("tok-abc"));
}

/// Test: the session file is not world-readable.
#[cfg(unix)]
#[tokio::test]
async fn test_session_file_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let temp = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(auth_response("tok-abc", "ada"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .env("VOX_API_URL", server.uri())
        .args(["login", "--username", "ada", "--password", "pw"])
        .assert()
        .success();

    let mode = std::fs::metadata(temp.path().join("session.json"))
        .unwrap()
        .permissions()
        .mode();
    assert_eq!(mode & 0o777, 0o600);
}

/// Test: bad credentials exit non-zero and surface the backend message.
#[tokio::test]
async fn test_login_failure() {
    let temp = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(serde_json::json!({"message": "Invalid credentials"})),
        )
        .mount(&server)
        .await;

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .env("VOX_API_URL", server.uri())
        .args(["login", "--username", "ada", "--password", "nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid credentials"));

    assert!(!temp.path().join("session.json").exists());
}

/// Test: register creates the account and stores the session.
#[tokio::test]
async fn test_register_stores_session() {
    let temp = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(auth_response("tok-new", "grace"))
        .expect(1)
        .mount(&server)
        .await;

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .env("VOX_API_URL", server.uri())
        .args(["register", "--username", "grace", "--password", "pw"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered as grace"));

    assert!(temp.path().join("session.json").exists());
}

/// Test: logout removes the session and is safe to repeat.
#[tokio::test]
async fn test_logout_clears_session() {
    let temp = tempdir().unwrap();
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(auth_response("tok-abc", "ada"))
        .mount(&server)
        .await;

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .env("VOX_API_URL", server.uri())
        .args(["login", "--username", "ada", "--password", "pw"])
        .assert()
        .success();

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out"));

    assert!(!temp.path().join("session.json").exists());

    cargo_bin_cmd!("vox")
        .env("VOX_HOME", temp.path())
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Not logged in"));
}
