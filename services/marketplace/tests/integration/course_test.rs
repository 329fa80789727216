use axum::http::StatusCode;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::helpers::{authed, course_body, id_of, spawn_app};

#[tokio::test]
async fn should_only_let_instructors_create_categories() {
    let app = spawn_app().await;
    let student = app.register("student@ucademic.dev").await;
    let owner = app.instructor("instructor@ucademic.dev").await;

    let refused = authed(app.server.post("/categories"), &student)
        .json(&json!({"name": "Rust"}))
        .await;
    assert_eq!(refused.status_code(), StatusCode::FORBIDDEN);
    assert_eq!(refused.json::<Value>()["kind"], "NOT_INSTRUCTOR");

    app.create_category(&owner, "Rust").await;
    let duplicate = authed(app.server.post("/categories"), &owner)
        .json(&json!({"name": "Rust"}))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);

    let listed = app.server.get("/categories").await;
    let body = listed.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Rust");
}

#[tokio::test]
async fn should_create_course_and_render_stored_encodings() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    app.create_category(&owner, "Rust").await;
    app.create_category(&owner, "Systems").await;

    let response = authed(app.server.post("/courses"), &owner)
        .json(&course_body("Rust from scratch", &["Rust", "Systems"]))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["title"], "Rust from scratch");
    assert_eq!(body["price"], 19.99);
    assert_eq!(body["level"], "beginner");
    assert_eq!(body["language"], "en");
    assert_eq!(body["description"]["weeks"], 6);
    assert_eq!(body["whatYouWillLearn"], json!(["Ownership", "Traits", "Async"]));
    assert_eq!(body["categories"], json!(["Rust", "Systems"]));
    assert_eq!(body["students"], 0);
    assert_eq!(body["instructorId"], owner.user_id.to_string());
    assert!(body["lastUpdated"].is_null());
}

#[tokio::test]
async fn should_reject_invalid_course_requests() {
    let app = spawn_app().await;
    let student = app.register("student@ucademic.dev").await;
    let owner = app.instructor("instructor@ucademic.dev").await;

    let not_instructor = authed(app.server.post("/courses"), &student)
        .json(&course_body("Rust from scratch", &[]))
        .await;
    assert_eq!(not_instructor.status_code(), StatusCode::FORBIDDEN);

    let unknown_category = authed(app.server.post("/courses"), &owner)
        .json(&course_body("Rust from scratch", &["Cooking"]))
        .await;
    assert_eq!(unknown_category.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        unknown_category.json::<Value>()["message"],
        "Category not found"
    );

    let long_title = authed(app.server.post("/courses"), &owner)
        .json(&course_body(&"x".repeat(101), &[]))
        .await;
    assert_eq!(long_title.status_code(), StatusCode::BAD_REQUEST);

    let mut huge_price = course_body("Rust from scratch", &[]);
    huge_price["price"] = json!(1e300);
    let huge_price = authed(app.server.post("/courses"), &owner)
        .json(&huge_price)
        .await;
    assert_eq!(huge_price.status_code(), StatusCode::BAD_REQUEST);

    app.create_course(&owner, "Rust from scratch").await;
    let duplicate = authed(app.server.post("/courses"), &owner)
        .json(&course_body("Rust from scratch", &[]))
        .await;
    assert_eq!(duplicate.status_code(), StatusCode::CONFLICT);
    assert_eq!(duplicate.json::<Value>()["message"], "Course already exists");
}

#[tokio::test]
async fn should_allow_same_title_for_different_instructors() {
    let app = spawn_app().await;
    let first = app.instructor("first@ucademic.dev").await;
    let second = app.instructor("second@ucademic.dev").await;

    app.create_course(&first, "Rust from scratch").await;
    app.create_course(&second, "Rust from scratch").await;
}

#[tokio::test]
async fn should_paginate_course_list() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    for n in 0..3 {
        app.create_course(&owner, &format!("Course {n}")).await;
    }

    let first_page = app.server.get("/courses?per-page=2&page=1").await;
    assert_eq!(first_page.status_code(), StatusCode::OK);
    assert_eq!(first_page.json::<Value>().as_array().unwrap().len(), 2);

    let second_page = app.server.get("/courses?per-page=2&page=2").await;
    assert_eq!(second_page.json::<Value>().as_array().unwrap().len(), 1);

    let everything = app.server.get("/courses").await;
    assert_eq!(everything.json::<Value>().as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn should_update_course_as_owner_only() {
    let app = spawn_app().await;
    let owner = app.instructor("owner@ucademic.dev").await;
    let other = app.instructor("other@ucademic.dev").await;
    app.create_category(&owner, "Rust").await;
    app.create_category(&owner, "Web").await;
    let response = authed(app.server.post("/courses"), &owner)
        .json(&course_body("Rust from scratch", &["Rust"]))
        .await;
    let course_id = id_of(&response.json::<Value>());

    let forbidden = authed(app.server.patch(&format!("/courses/{course_id}")), &other)
        .json(&json!({"title": "Hijacked"}))
        .await;
    assert_eq!(forbidden.status_code(), StatusCode::FORBIDDEN);

    let updated = authed(app.server.patch(&format!("/courses/{course_id}")), &owner)
        .json(&json!({"price": 49.5, "level": "advanced", "categories": ["Web"]}))
        .await;
    assert_eq!(updated.status_code(), StatusCode::OK);
    let body = updated.json::<Value>();
    assert_eq!(body["title"], "Rust from scratch");
    assert_eq!(body["price"], 49.5);
    assert_eq!(body["level"], "advanced");
    assert_eq!(body["categories"], json!(["Web"]));
    assert!(body["lastUpdated"].is_string());

    let missing = authed(
        app.server.patch(&format!("/courses/{}", Uuid::now_v7())),
        &owner,
    )
    .json(&json!({"title": "Ghost"}))
    .await;
    assert_eq!(missing.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_enroll_once_and_count_students() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let student = app.register("student@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let path = format!("/courses/{course_id}/enroll");

    let first = authed(app.server.post(&path), &student).await;
    assert_eq!(first.status_code(), StatusCode::CREATED);

    let again = authed(app.server.post(&path), &student).await;
    assert_eq!(again.status_code(), StatusCode::CONFLICT);
    assert_eq!(again.json::<Value>()["message"], "Enrollment already exists");

    let detail = app.server.get(&format!("/courses/{course_id}")).await;
    assert_eq!(detail.json::<Value>()["students"], 1);

    let unknown = authed(
        app.server.post(&format!("/courses/{}/enroll", Uuid::now_v7())),
        &student,
    )
    .await;
    assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_course() {
    let app = spawn_app().await;

    let response = app.server.get(&format!("/courses/{}", Uuid::now_v7())).await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    assert_eq!(response.json::<Value>()["kind"], "NOT_FOUND");
}
