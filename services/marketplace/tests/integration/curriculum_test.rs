use axum::http::StatusCode;
use serde_json::{Value, json};

use crate::helpers::{authed, spawn_app};

/// `(kind, title)` of every entry in a rendered section's contents.
fn entries(section: &Value) -> Vec<(String, String)> {
    section["contents"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| {
            let (kind, inner) = item.as_object().unwrap().iter().next().unwrap();
            (kind.clone(), inner["title"].as_str().unwrap().to_owned())
        })
        .collect()
}

#[tokio::test]
async fn should_merge_lessons_and_quizzes_by_order() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;

    app.create_lesson(&owner, section_id, "L5", Some(5)).await;
    app.create_lesson(&owner, section_id, "L2", Some(2)).await;
    app.create_quiz(&owner, section_id, "Q3", Some(3)).await;

    let detail = app.server.get(&format!("/courses/{course_id}")).await;
    assert_eq!(detail.status_code(), StatusCode::OK);
    let body = detail.json::<Value>();
    let section = &body["contents"][0];
    assert_eq!(section["sectionTitle"], "Basics");
    assert_eq!(
        entries(section),
        vec![
            ("lesson".to_owned(), "L2".to_owned()),
            ("quiz".to_owned(), "Q3".to_owned()),
            ("lesson".to_owned(), "L5".to_owned()),
        ]
    );
}

#[tokio::test]
async fn should_put_unordered_lessons_first_and_quiz_before_equal_lesson() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;

    app.create_lesson(&owner, section_id, "L1", Some(1)).await;
    app.create_lesson(&owner, section_id, "Intro", None).await;
    app.create_quiz(&owner, section_id, "Q1", Some(1)).await;

    let body = app
        .server
        .get(&format!("/courses/{course_id}"))
        .await
        .json::<Value>();
    assert_eq!(
        entries(&body["contents"][0]),
        vec![
            ("lesson".to_owned(), "Intro".to_owned()),
            ("quiz".to_owned(), "Q1".to_owned()),
            ("lesson".to_owned(), "L1".to_owned()),
        ]
    );
}

#[tokio::test]
async fn should_render_quiz_only_section() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Checkpoint").await;
    app.create_quiz(&owner, section_id, "Q1", Some(1)).await;

    let body = app
        .server
        .get(&format!("/courses/{course_id}"))
        .await
        .json::<Value>();
    assert_eq!(
        entries(&body["contents"][0]),
        vec![("quiz".to_owned(), "Q1".to_owned())]
    );
}

#[tokio::test]
async fn should_track_section_totals_when_videos_attach() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let first = app.create_lesson(&owner, section_id, "First", Some(1)).await;
    let second = app.create_lesson(&owner, section_id, "Second", Some(2)).await;

    let attach = |lesson: uuid::Uuid, seconds: i32| {
        authed(app.server.put(&format!("/lessons/{lesson}/video")), &owner).json(&json!({
            "link": format!("https://cdn.ucademic.dev/{lesson}.m3u8"),
            "durationSeconds": seconds,
        }))
    };

    let response = attach(first, 300).await;
    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["lesson"]["duration"], 300);
    assert_eq!(body["section"]["duration"], "5m");
    assert_eq!(body["section"]["lessons"], 1);

    let body = attach(second, 120).await.json::<Value>();
    assert_eq!(body["section"]["duration"], "7m");
    assert_eq!(body["section"]["lessons"], 2);

    // Replacing a video swaps its duration without recounting the lesson.
    let body = attach(first, 200).await.json::<Value>();
    assert_eq!(body["section"]["duration"], "5m 20s");
    assert_eq!(body["section"]["lessons"], 2);

    let detail = app
        .server
        .get(&format!("/courses/{course_id}"))
        .await
        .json::<Value>();
    assert_eq!(detail["duration"], "5m 20s");
    assert_eq!(detail["lessons"], 2);
}

#[tokio::test]
async fn should_reject_curriculum_writes_from_non_owner() {
    let app = spawn_app().await;
    let owner = app.instructor("owner@ucademic.dev").await;
    let other = app.instructor("other@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let lesson_id = app.create_lesson(&owner, section_id, "First", None).await;

    let section = authed(
        app.server.post(&format!("/courses/{course_id}/sections")),
        &other,
    )
    .json(&json!({"sectionTitle": "Sneaky"}))
    .await;
    assert_eq!(section.status_code(), StatusCode::FORBIDDEN);

    let lesson = authed(app.server.patch(&format!("/lessons/{lesson_id}")), &other)
        .json(&json!({"title": "Renamed"}))
        .await;
    assert_eq!(lesson.status_code(), StatusCode::FORBIDDEN);

    let renamed = authed(app.server.patch(&format!("/sections/{section_id}")), &owner)
        .json(&json!({"sectionTitle": "Getting started"}))
        .await;
    assert_eq!(renamed.status_code(), StatusCode::OK);
    assert_eq!(renamed.json::<Value>()["sectionTitle"], "Getting started");
}

#[tokio::test]
async fn should_update_lesson_fields() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let lesson_id = app.create_lesson(&owner, section_id, "First", None).await;

    let response = authed(app.server.patch(&format!("/lessons/{lesson_id}")), &owner)
        .json(&json!({"freePreview": true, "orderInSection": 4}))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body = response.json::<Value>();
    assert_eq!(body["title"], "First");
    assert_eq!(body["freePreview"], true);
    assert_eq!(body["orderInSection"], 4);
}

#[tokio::test]
async fn should_attach_and_list_lesson_resources() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let lesson_id = app.create_lesson(&owner, section_id, "First", None).await;
    let path = format!("/lessons/{lesson_id}/resources");

    let created = authed(app.server.post(&path), &owner)
        .json(&json!({"name": "Slides", "link": "https://cdn.ucademic.dev/slides.pdf"}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let listed = app.server.get(&path).await;
    assert_eq!(listed.status_code(), StatusCode::OK);
    let body = listed.json::<Value>();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Slides");
}

#[tokio::test]
async fn should_validate_quiz_question_answers() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let quiz_id = app.create_quiz(&owner, section_id, "Check", None).await;
    let path = format!("/quizzes/{quiz_id}/questions");

    let out_of_range = authed(app.server.post(&path), &owner)
        .json(&json!({"question": "Who owns it?", "options": ["me", "you"], "answer": 2}))
        .await;
    assert_eq!(out_of_range.status_code(), StatusCode::BAD_REQUEST);

    let created = authed(app.server.post(&path), &owner)
        .json(&json!({"question": "Who owns it?", "options": ["me", "you"], "answer": 1}))
        .await;
    assert_eq!(created.status_code(), StatusCode::CREATED);

    let quiz = app.server.get(&format!("/quizzes/{quiz_id}")).await;
    assert_eq!(quiz.status_code(), StatusCode::OK);
    let body = quiz.json::<Value>();
    assert_eq!(body["title"], "Check");
    assert_eq!(body["questions"][0]["options"], json!(["me", "you"]));
    assert_eq!(body["questions"][0]["answer"], 1);
}

#[tokio::test]
async fn should_reject_video_that_overflows_section_duration() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let first = app.create_lesson(&owner, section_id, "First", Some(1)).await;
    let second = app.create_lesson(&owner, section_id, "Second", Some(2)).await;

    let attach = |lesson: uuid::Uuid, seconds: i32| {
        authed(app.server.put(&format!("/lessons/{lesson}/video")), &owner).json(&json!({
            "link": format!("https://cdn.ucademic.dev/{lesson}.m3u8"),
            "durationSeconds": seconds,
        }))
    };

    assert_eq!(attach(first, i32::MAX).await.status_code(), StatusCode::OK);
    let overflow = attach(second, 1).await;
    assert_eq!(overflow.status_code(), StatusCode::BAD_REQUEST);

    let detail = app
        .server
        .get(&format!("/courses/{course_id}"))
        .await
        .json::<Value>();
    assert_eq!(detail["lessons"], 1);
    let lessons = &detail["contents"][0]["contents"];
    assert_eq!(lessons[1]["lesson"]["title"], "Second");
    assert!(lessons[1]["lesson"]["duration"].is_null());
}

#[tokio::test]
async fn should_reject_order_keys_past_storable_range() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let lesson_id = app.create_lesson(&owner, section_id, "First", Some(1)).await;

    let lesson = authed(
        app.server.post(&format!("/sections/{section_id}/lessons")),
        &owner,
    )
    .json(&json!({"title": "Far away", "orderInSection": 3_000_000_000u32}))
    .await;
    assert_eq!(lesson.status_code(), StatusCode::BAD_REQUEST);

    let quiz = authed(
        app.server.post(&format!("/sections/{section_id}/quizzes")),
        &owner,
    )
    .json(&json!({"title": "Far away", "orderInSection": 3_000_000_000u32}))
    .await;
    assert_eq!(quiz.status_code(), StatusCode::BAD_REQUEST);

    let update = authed(app.server.patch(&format!("/lessons/{lesson_id}")), &owner)
        .json(&json!({"orderInSection": 3_000_000_000u32}))
        .await;
    assert_eq!(update.status_code(), StatusCode::BAD_REQUEST);

    let largest = authed(app.server.patch(&format!("/lessons/{lesson_id}")), &owner)
        .json(&json!({"orderInSection": i32::MAX}))
        .await;
    assert_eq!(largest.status_code(), StatusCode::OK);
    assert_eq!(largest.json::<Value>()["orderInSection"], i32::MAX);
}

#[tokio::test]
async fn should_clear_lesson_order_with_explicit_null() {
    let app = spawn_app().await;
    let owner = app.instructor("instructor@ucademic.dev").await;
    let course_id = app.create_course(&owner, "Rust from scratch").await;
    let section_id = app.create_section(&owner, course_id, "Basics").await;
    let lesson_id = app.create_lesson(&owner, section_id, "First", Some(3)).await;
    let path = format!("/lessons/{lesson_id}");

    let untouched = authed(app.server.patch(&path), &owner)
        .json(&json!({"title": "Renamed"}))
        .await;
    assert_eq!(untouched.status_code(), StatusCode::OK);
    assert_eq!(untouched.json::<Value>()["orderInSection"], 3);

    let cleared = authed(app.server.patch(&path), &owner)
        .json(&json!({"orderInSection": null}))
        .await;
    assert_eq!(cleared.status_code(), StatusCode::OK);
    assert!(cleared.json::<Value>()["orderInSection"].is_null());
}
