//! Test helpers for the REST API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::http::header::AUTHORIZATION;
use axum_test::TestServer;
use serde_json::{json, Value};

use talkboard::auth::TokenService;
use talkboard::web::{create_router, AppState};
use talkboard::{Config, Database};

/// Create a test server backed by an in-memory database.
pub async fn create_test_server() -> (TestServer, Database) {
    let config = Config::default();

    let db = Database::open_in_memory()
        .await
        .expect("Failed to create test database");

    let tokens = Arc::new(TokenService::new(&config.jwt).expect("Failed to build token service"));
    let app_state = Arc::new(AppState::new(db.clone(), tokens.clone()));

    let router = create_router(app_state, tokens, &config.server.cors_origins);
    let server = TestServer::new(router).expect("Failed to create test server");

    (server, db)
}

/// Register a member through the API and return the response body.
pub async fn register_member(server: &TestServer, nickname: &str) -> Value {
    let response = server
        .post("/api/v1/members")
        .json(&json!({
            "nickname": nickname,
            "username": format!("{} Name", nickname),
            "email": format!("{}@example.com", nickname),
            "password": "password123"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Log a member in and return the bearer token.
pub async fn login_member(server: &TestServer, nickname: &str) -> String {
    let response = server
        .post("/api/v1/members/login")
        .json(&json!({
            "nickname": nickname,
            "password": "password123"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    body["data"]["token"]
        .as_str()
        .expect("login response carries a token")
        .to_string()
}

/// Register and log in, returning the token.
pub async fn register_and_login(server: &TestServer, nickname: &str) -> String {
    register_member(server, nickname).await;
    login_member(server, nickname).await
}

/// Create a board through the API and return its id.
pub async fn create_board(server: &TestServer, token: &str, name: &str) -> i64 {
    let response = server
        .post("/api/v1/boards")
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({ "name": name }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("board id")
}

/// Create a post through the API and return its id.
pub async fn create_post(server: &TestServer, token: &str, board_id: i64, title: &str) -> i64 {
    let response = server
        .post(&format!("/api/v1/boards/{}/posts", board_id))
        .add_header(AUTHORIZATION, format!("Bearer {}", token))
        .json(&json!({
            "title": title,
            "content": format!("{} content", title)
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let body: Value = response.json();
    body["data"]["id"].as_i64().expect("post id")
}

/// Bearer header value for a token.
pub fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}
