use axum::http::{StatusCode, header};
use serde_json::{Value, json};
use uuid::Uuid;

use ucademic_testing::auth::MockAuth;

use crate::helpers::{PASSWORD, authed, spawn_app};

#[tokio::test]
async fn should_register_and_return_bearer_token() {
    let app = spawn_app().await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({"email": "student@ucademic.dev", "password": PASSWORD}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["tokenType"], "bearer");
    assert!(body["accessToken"].as_str().is_some_and(|t| !t.is_empty()));
}

#[tokio::test]
async fn should_reject_taken_email() {
    let app = spawn_app().await;
    app.register("student@ucademic.dev").await;

    let response = app
        .server
        .post("/auth/register")
        .json(&json!({"email": "student@ucademic.dev", "password": "another-password"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "ALREADY_EXISTS");
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn should_reject_short_password_and_bad_email() {
    let app = spawn_app().await;

    let short = app
        .server
        .post("/auth/register")
        .json(&json!({"email": "student@ucademic.dev", "password": "short"}))
        .await;
    assert_eq!(short.status_code(), StatusCode::BAD_REQUEST);

    let bad_email = app
        .server
        .post("/auth/register")
        .json(&json!({"email": "not-an-email", "password": PASSWORD}))
        .await;
    assert_eq!(bad_email.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn should_login_with_registered_credentials() {
    let app = spawn_app().await;
    let auth = app.register("student@ucademic.dev").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "student@ucademic.dev", "password": PASSWORD}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let token = response.json::<Value>()["accessToken"]
        .as_str()
        .unwrap()
        .to_owned();
    let me = app
        .server
        .get("/users/@me")
        .add_header(
            header::AUTHORIZATION,
            format!("Bearer {token}").parse::<axum::http::HeaderValue>().unwrap(),
        )
        .await;
    assert_eq!(me.status_code(), StatusCode::OK);
    assert_eq!(me.json::<Value>()["id"], auth.user_id.to_string());
}

#[tokio::test]
async fn should_reject_wrong_password_with_bearer_challenge() {
    let app = spawn_app().await;
    app.register("student@ucademic.dev").await;

    let response = app
        .server
        .post("/auth/login")
        .json(&json!({"email": "student@ucademic.dev", "password": "wrong-password"}))
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header(header::WWW_AUTHENTICATE), "Bearer");
    assert_eq!(
        response.json::<Value>()["message"],
        "incorrect email or password"
    );
}

#[tokio::test]
async fn should_require_bearer_token() {
    let app = spawn_app().await;

    let response = app.server.get("/users/@me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.header(header::WWW_AUTHENTICATE), "Bearer");
}

#[tokio::test]
async fn should_reject_token_for_unknown_user() {
    let app = spawn_app().await;

    let response = authed(app.server.get("/users/@me"), &MockAuth::new(Uuid::now_v7())).await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(response.json::<Value>()["kind"], "UNAUTHENTICATED");
}
