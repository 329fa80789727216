use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{authed, spawn_app};

#[tokio::test]
async fn should_return_new_account_as_student() {
    let app = spawn_app().await;
    let auth = app.register("student@ucademic.dev").await;

    let response = authed(app.server.get("/users/@me"), &auth).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["email"], "student@ucademic.dev");
    assert_eq!(body["isInstructor"], false);
    assert!(body.get("hashedPassword").is_none());
}

#[tokio::test]
async fn should_update_profile_fields() {
    let app = spawn_app().await;
    let auth = app.register("student@ucademic.dev").await;

    let response = authed(app.server.patch("/users/@me/profile"), &auth)
        .json(&json!({
            "fullName": "Ada Lovelace",
            "phoneNumber": "0912345678",
            "dateOfBirth": "1990-12-10",
            "gender": "Female",
            "bio": {"headline": "Analyst", "links": ["https://example.com"]},
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["fullName"], "Ada Lovelace");
    assert_eq!(body["phoneNumber"], "0912345678");
    assert_eq!(body["dateOfBirth"], "1990-12-10");
    assert_eq!(body["gender"], "Female");
    assert_eq!(body["bio"]["headline"], "Analyst");

    let me = authed(app.server.get("/users/@me"), &auth).await;
    assert_eq!(me.json::<Value>()["bio"]["links"][0], "https://example.com");
}

#[tokio::test]
async fn should_reject_invalid_profile_values() {
    let app = spawn_app().await;
    let auth = app.register("student@ucademic.dev").await;

    let phone = authed(app.server.patch("/users/@me/profile"), &auth)
        .json(&json!({"phoneNumber": "12-34"}))
        .await;
    assert_eq!(phone.status_code(), StatusCode::BAD_REQUEST);

    let birth = authed(app.server.patch("/users/@me/profile"), &auth)
        .json(&json!({"dateOfBirth": "2999-01-01"}))
        .await;
    assert_eq!(birth.status_code(), StatusCode::BAD_REQUEST);

    let empty = authed(app.server.patch("/users/@me/profile"), &auth)
        .json(&json!({}))
        .await;
    assert_eq!(empty.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(empty.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_promote_user_to_instructor() {
    let app = spawn_app().await;
    let auth = app.register("instructor@ucademic.dev").await;

    let response = authed(app.server.post("/users/@me/instructor"), &auth).await;

    assert_eq!(response.status_code(), StatusCode::OK);
    assert_eq!(response.json::<Value>()["isInstructor"], true);
}

#[tokio::test]
async fn should_list_enrolled_courses() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let student = app.register("student@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    app.create_course(&owner, "Async Rust").await;

    let enroll = authed(
        app.server.post(&format!("/courses/{course_id}/enroll")),
        &student,
    )
    .await;
    assert_eq!(enroll.status_code(), StatusCode::CREATED);

    let response = authed(app.server.get("/users/@me/courses"), &student).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    let courses = body.as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["title"], "Rust from scratch");
    assert_eq!(courses[0]["students"], 1);
}
