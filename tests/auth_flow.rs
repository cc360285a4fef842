//! Registration and login flow tests

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};
use tempfile::TempDir;

use textdedup_server::config::Config;
use textdedup_server::db;
use textdedup_server::session::SessionManager;
use textdedup_server::state::AppState;

async fn test_server() -> (TestServer, TempDir) {
    let dir = TempDir::new().unwrap();
    let url = format!("sqlite:{}", dir.path().join("test.db").display());
    let pool = db::create_pool(&url).await.unwrap();

    let state = AppState::new(Config::default(), pool, SessionManager::new());
    let server = TestServer::new(textdedup_server::app(state)).unwrap();
    (server, dir)
}

fn register_body(username: &str, password: &str, confirm: &str) -> Value {
    json!({
        "username": username,
        "password": password,
        "confirmPassword": confirm,
    })
}

#[tokio::test]
async fn health_check_responds() {
    let (server, _dir) = test_server().await;

    let response = server.get("/health").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn register_then_login_succeeds() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/v1/auth/register")
        .json(&register_body("alice", "secret1", "secret1"))
        .await;
    assert_eq!(response.status_code(), StatusCode::CREATED);

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["username"], "alice");
    assert!(!body["token"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn login_with_wrong_password_fails() {
    let (server, _dir) = test_server().await;

    server
        .post("/api/v1/auth/register")
        .json(&register_body("alice", "secret1", "secret1"))
        .await;

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({"username": "alice", "password": "wrong99"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_CREDENTIALS");
}

#[tokio::test]
async fn login_with_unknown_user_fails() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/v1/auth/login")
        .json(&json!({"username": "nobody", "password": "whatever"}))
        .await;
    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_username_is_rejected() {
    let (server, _dir) = test_server().await;

    let first = server
        .post("/api/v1/auth/register")
        .json(&register_body("alice", "secret1", "secret1"))
        .await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let second = server
        .post("/api/v1/auth/register")
        .json(&register_body("alice", "another1", "another1"))
        .await;
    assert_eq!(second.status_code(), StatusCode::CONFLICT);

    let body: Value = second.json();
    assert_eq!(body["code"], "USERNAME_TAKEN");

    // The original credential still works
    let login = server
        .post("/api/v1/auth/login")
        .json(&json!({"username": "alice", "password": "secret1"}))
        .await;
    assert_eq!(login.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn mismatched_confirmation_is_rejected() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/v1/auth/register")
        .json(&register_body("bob", "secret1", "secret2"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "PASSWORD_MISMATCH");
}

#[tokio::test]
async fn short_password_is_rejected() {
    let (server, _dir) = test_server().await;

    let response = server
        .post("/api/v1/auth/register")
        .json(&register_body("bob", "abc12", "abc12"))
        .await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "PASSWORD_TOO_SHORT");

    // Registration state unchanged: the name is still free
    let retry = server
        .post("/api/v1/auth/register")
        .json(&register_body("bob", "abc123", "abc123"))
        .await;
    assert_eq!(retry.status_code(), StatusCode::CREATED);
}

#[tokio::test]
async fn logout_destroys_the_session() {
    let (server, _dir) = test_server().await;

    server
        .post("/api/v1/auth/register")
        .json(&register_body("alice", "secret1", "secret1"))
        .await;
    let login: Value = server
        .post("/api/v1/auth/login")
        .json(&json!({"username": "alice", "password": "secret1"}))
        .await
        .json();
    let token = login["token"].as_str().unwrap().to_string();

    let logout = server
        .post("/api/v1/auth/logout")
        .add_header(
            axum::http::HeaderName::from_static("x-session-token"),
            axum::http::HeaderValue::from_str(&token).unwrap(),
        )
        .await;
    assert_eq!(logout.status_code(), StatusCode::NO_CONTENT);

    let history = server
        .get("/api/v1/uploads")
        .add_header(
            axum::http::HeaderName::from_static("x-session-token"),
            axum::http::HeaderValue::from_str(&token).unwrap(),
        )
        .await;
    assert_eq!(history.status_code(), StatusCode::UNAUTHORIZED);
}
