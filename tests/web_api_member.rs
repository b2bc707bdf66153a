//! Member registration, login, and token handling tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use serde_json::{json, Value};

use common::{bearer, create_board, create_test_server, login_member, register_and_login, register_member};

#[tokio::test]
async fn test_register_success() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/v1/members")
        .json(&json!({
            "nickname": "alice",
            "username": "Alice",
            "email": "alice@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    assert_eq!(body["data"]["nickname"], "alice");
    assert_eq!(body["data"]["member_name"], "Alice");
    assert_eq!(body["data"]["role"], "NORMAL");
    assert!(body["data"]["id"].is_i64());
}

#[tokio::test]
async fn test_register_duplicate_nickname() {
    let (server, _db) = create_test_server().await;
    register_member(&server, "alice").await;

    let response = server
        .post("/api/v1/members")
        .json(&json!({
            "nickname": "alice",
            "username": "Another Alice",
            "email": "other@example.com",
            "password": "password123"
        }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "CONFLICT");
}

#[tokio::test]
async fn test_register_validation_details() {
    let (server, _db) = create_test_server().await;

    let response = server
        .post("/api/v1/members")
        .json(&json!({
            "nickname": "x",
            "username": "Name",
            "email": "not-an-email",
            "password": "short"
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["nickname"].is_array());
    assert!(body["error"]["details"]["email"].is_array());
    assert!(body["error"]["details"]["password"].is_array());
}

#[tokio::test]
async fn test_registration_pins_default_boards() {
    let (server, _db) = create_test_server().await;
    let admin_token = register_and_login(&server, "founder").await;

    // A default board pinned automatically at registration
    server
        .post("/api/v1/boards")
        .add_header(AUTHORIZATION, bearer(&admin_token))
        .json(&json!({ "name": "notices", "is_default": true }))
        .await
        .assert_status(StatusCode::CREATED);

    let token = register_and_login(&server, "newcomer").await;
    let response = server
        .get("/api/v1/boards/pinned")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["board_name"], "notices");
    assert_eq!(body["data"][0]["order_rank"], 1);
}

#[tokio::test]
async fn test_login_success() {
    let (server, _db) = create_test_server().await;
    register_member(&server, "alice").await;

    let response = server
        .post("/api/v1/members/login")
        .json(&json!({ "nickname": "alice", "password": "password123" }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"]["token"].is_string());
    assert!(body["data"]["expires_in"].is_u64());
    assert_eq!(body["data"]["member"]["nickname"], "alice");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let (server, _db) = create_test_server().await;
    register_member(&server, "alice").await;

    let wrong_password = server
        .post("/api/v1/members/login")
        .json(&json!({ "nickname": "alice", "password": "wrong-password" }))
        .await;
    wrong_password.assert_status(StatusCode::UNAUTHORIZED);

    let unknown_nickname = server
        .post("/api/v1/members/login")
        .json(&json!({ "nickname": "nobody", "password": "password123" }))
        .await;
    unknown_nickname.assert_status(StatusCode::UNAUTHORIZED);

    let a: Value = wrong_password.json();
    let b: Value = unknown_nickname.json();
    assert_eq!(a["error"]["message"], b["error"]["message"]);
}

#[tokio::test]
async fn test_me_requires_token() {
    let (server, _db) = create_test_server().await;

    let response = server.get("/api/v1/members/me").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_token() {
    let (server, _db) = create_test_server().await;
    let token = register_and_login(&server, "alice").await;

    let response = server
        .get("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["nickname"], "alice");
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_garbage_token_rejected() {
    let (server, _db) = create_test_server().await;

    let response = server
        .get("/api/v1/members/me")
        .add_header(AUTHORIZATION, "Bearer not.a.token")
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
    assert!(body["error"]["message"]
        .as_str()
        .unwrap()
        .contains("malformed"));
}

#[tokio::test]
async fn test_anonymous_endpoint_accepts_no_header_but_rejects_bad_one() {
    let (server, _db) = create_test_server().await;

    // No header: anonymous access is fine
    server.get("/api/v1/boards/with-pin").await.assert_status_ok();

    // Credentials offered but invalid: reject rather than downgrade
    let response = server
        .get("/api/v1/boards/with-pin")
        .add_header(AUTHORIZATION, "Bearer garbage")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);

    let response = server
        .get("/api/v1/boards/with-pin")
        .add_header(AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_update_profile() {
    let (server, _db) = create_test_server().await;
    let token = register_and_login(&server, "alice").await;

    let response = server
        .put("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({
            "member_name": "Alice Renamed",
            "phone": "010-1234-5678"
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["data"]["member_name"], "Alice Renamed");
    assert_eq!(body["data"]["phone"], "010-1234-5678");
    // Unchanged fields stay put
    assert_eq!(body["data"]["email"], "alice@example.com");
}

#[tokio::test]
async fn test_update_profile_clears_phone_with_null() {
    let (server, _db) = create_test_server().await;
    let token = register_and_login(&server, "alice").await;

    server
        .put("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "phone": "010-1234-5678" }))
        .await
        .assert_status_ok();

    let response = server
        .put("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "phone": null }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert!(body["data"].get("phone").is_none() || body["data"]["phone"].is_null());
}

#[tokio::test]
async fn test_update_profile_email_conflict() {
    let (server, _db) = create_test_server().await;
    register_member(&server, "bob").await;
    let token = register_and_login(&server, "alice").await;

    let response = server
        .put("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&token))
        .json(&json!({ "email": "bob@example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_token_works_across_endpoints() {
    let (server, _db) = create_test_server().await;
    let token = register_and_login(&server, "alice").await;

    let board_id = create_board(&server, &token, "general").await;
    assert!(board_id > 0);

    let me = login_member(&server, "alice").await;
    // A fresh login token is just as valid
    server
        .get("/api/v1/members/me")
        .add_header(AUTHORIZATION, bearer(&me))
        .await
        .assert_status_ok();
}
