use sea_orm::ActiveValue::Set;
use serde_json::json;
use uuid::Uuid;

use ucademic_core::error::GatewayError;
use ucademic_core::gateway::{FetchRequest, Gateway};
use ucademic_domain::course::{CourseLanguage, CourseLevel};
use ucademic_marketplace::domain::repository::{
    CourseRepository, CurriculumRepository, UserRepository,
};
use ucademic_marketplace::domain::types::{NewCourse, NewLesson};
use ucademic_marketplace::error::MarketplaceError;
use ucademic_marketplace::infra::db::{
    DbCourseRepository, DbCurriculumRepository, DbUserRepository,
};
use ucademic_marketplace_schema::{courses, users};

use crate::helpers::test_database;

fn new_course(instructor_id: Uuid, title: &str) -> NewCourse {
    NewCourse {
        title: title.to_owned(),
        headline: None,
        description: Some(json!({"summary": "Ownership in depth", "tags": ["rust"]})),
        level: CourseLevel::Intermediate,
        language: CourseLanguage::Vi,
        price_cents: 2500,
        thumbnail: None,
        requirements: Some("A laptop".into()),
        what_you_will_learn: Some(vec!["Borrowing".into(), "Lifetimes".into()]),
        instructor_id,
    }
}

#[tokio::test]
async fn should_fail_required_fetch_of_missing_user() {
    let db = test_database().await;

    let result = Gateway::new(&db)
        .fetch(FetchRequest::<users::Entity>::by_id(Uuid::now_v7()).require_found())
        .await;

    assert!(matches!(result, Err(GatewayError::NotFound("User"))));
}

#[tokio::test]
async fn should_generate_id_when_persisting_new_course() {
    let db = test_database().await;
    let users = DbUserRepository { db: db.clone() };
    let instructor = users.create("instructor@ucademic.dev", "hash").await.unwrap();
    let gateway = Gateway::new(&db);

    let stored = gateway
        .persist(courses::ActiveModel {
            title: Set("Rust from scratch".into()),
            headline: Set(None),
            description: Set(None),
            level: Set("beginner".into()),
            language: Set("en".into()),
            price_cents: Set(0),
            thumbnail: Set(None),
            requirements: Set(None),
            what_you_will_learn: Set(None),
            rating: Set(None),
            instructor_id: Set(instructor.id),
            last_updated: Set(None),
            ..Default::default()
        })
        .await
        .unwrap();

    assert!(!stored.id.is_nil());
    let fetched = gateway
        .fetch(FetchRequest::<courses::Entity>::by_id(stored.id))
        .await
        .unwrap()
        .into_one();
    assert_eq!(fetched, Some(stored));
}

#[tokio::test]
async fn should_round_trip_encoded_course_columns() {
    let db = test_database().await;
    let users = DbUserRepository { db: db.clone() };
    let courses = DbCourseRepository { db: db.clone() };
    let instructor = users.create("instructor@ucademic.dev", "hash").await.unwrap();

    let created = courses
        .create(&new_course(instructor.id, "Lifetimes"), &[])
        .await
        .unwrap();
    let found = courses.find_by_id(created.id).await.unwrap().unwrap();

    assert_eq!(
        found.description,
        Some(json!({"summary": "Ownership in depth", "tags": ["rust"]}))
    );
    assert_eq!(
        found.what_you_will_learn,
        Some(vec!["Borrowing".to_owned(), "Lifetimes".to_owned()])
    );
    assert_eq!(found.level, CourseLevel::Intermediate);
    assert_eq!(found.language, CourseLanguage::Vi);
    assert_eq!(found.price_cents, 2500);
}

#[tokio::test]
async fn should_reject_backtick_in_learning_outcomes() {
    let db = test_database().await;
    let users = DbUserRepository { db: db.clone() };
    let courses = DbCourseRepository { db: db.clone() };
    let instructor = users.create("instructor@ucademic.dev", "hash").await.unwrap();

    let mut course = new_course(instructor.id, "Lifetimes");
    course.what_you_will_learn = Some(vec!["use `Box`".into()]);
    let result = courses.create(&course, &[]).await;

    assert!(matches!(result, Err(MarketplaceError::InvalidInput(_))));
}

#[tokio::test]
async fn should_load_section_contents_with_unordered_items_first() {
    let db = test_database().await;
    let users = DbUserRepository { db: db.clone() };
    let courses = DbCourseRepository { db: db.clone() };
    let curriculum = DbCurriculumRepository { db: db.clone() };
    let instructor = users.create("instructor@ucademic.dev", "hash").await.unwrap();
    let course = courses
        .create(&new_course(instructor.id, "Lifetimes"), &[])
        .await
        .unwrap();
    let section = curriculum.create_section(course.id, "Basics").await.unwrap();

    for (title, order) in [("Third", Some(3)), ("Intro", None), ("First", Some(1))] {
        curriculum
            .create_lesson(
                section.id,
                &NewLesson {
                    title: title.into(),
                    free_preview: false,
                    order_in_section: order,
                },
            )
            .await
            .unwrap();
    }

    let contents = curriculum.section_contents(course.id).await.unwrap();
    assert_eq!(contents.len(), 1);
    let titles: Vec<_> = contents[0].lessons.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, ["Intro", "First", "Third"]);
    assert!(contents[0].quizzes.is_empty());
}
