use axum::http::{StatusCode, header};
use axum_test::{TestRequest, TestServer};
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use uuid::Uuid;

use ucademic_auth_types::identity::JwtSecret;
use ucademic_auth_types::token::validate_access_token;
use ucademic_marketplace::router::{build_router, cors_layer};
use ucademic_marketplace::state::AppState;
use ucademic_marketplace_schema::{
    categories, course_categories, courses, lesson_resources, lessons, quiz_questions, quizzes,
    sections, user_courses, users,
};
use ucademic_testing::auth::{MockAuth, TEST_JWT_SECRET};
use ucademic_testing::db::{create_table, memory_database};

pub const PASSWORD: &str = "correct-horse-battery";

/// In-memory database with every marketplace table, parents first.
pub async fn test_database() -> DatabaseConnection {
    let db = memory_database().await;
    create_table(&db, users::Entity).await;
    create_table(&db, categories::Entity).await;
    create_table(&db, courses::Entity).await;
    create_table(&db, course_categories::Entity).await;
    create_table(&db, user_courses::Entity).await;
    create_table(&db, sections::Entity).await;
    create_table(&db, lessons::Entity).await;
    create_table(&db, lesson_resources::Entity).await;
    create_table(&db, quizzes::Entity).await;
    create_table(&db, quiz_questions::Entity).await;
    db
}

pub struct TestApp {
    pub server: TestServer,
    pub db: DatabaseConnection,
}

pub async fn spawn_app() -> TestApp {
    let db = test_database().await;
    let state = AppState {
        db: db.clone(),
        jwt_secret: JwtSecret::new(TEST_JWT_SECRET),
        access_token_ttl_seconds: 1800,
    };
    let router = build_router(state, cors_layer("http://localhost:4200").unwrap());
    TestApp {
        server: TestServer::new(router).unwrap(),
        db,
    }
}

/// Attach a bearer header for `auth` to `request`.
pub fn authed(request: TestRequest, auth: &MockAuth) -> TestRequest {
    request.add_header(header::AUTHORIZATION, auth.authorization())
}

impl TestApp {
    /// Register a student account and return its identity.
    pub async fn register(&self, email: &str) -> MockAuth {
        let response = self
            .server
            .post("/auth/register")
            .json(&json!({"email": email, "password": PASSWORD}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        let body = response.json::<Value>();
        let token = body["accessToken"].as_str().unwrap();
        let info = validate_access_token(token, TEST_JWT_SECRET).unwrap();
        MockAuth::new(info.user_id)
    }

    /// Register an account and promote it to instructor.
    pub async fn instructor(&self, email: &str) -> MockAuth {
        let auth = self.register(email).await;
        let response = authed(self.server.post("/users/@me/instructor"), &auth).await;
        assert_eq!(response.status_code(), StatusCode::OK);
        auth
    }

    pub async fn create_category(&self, auth: &MockAuth, name: &str) {
        let response = authed(self.server.post("/categories"), auth)
            .json(&json!({"name": name}))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
    }

    /// Create a course and return its id.
    pub async fn create_course(&self, auth: &MockAuth, title: &str) -> Uuid {
        let response = authed(self.server.post("/courses"), auth)
            .json(&course_body(title, &[]))
            .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }

    pub async fn create_section(&self, auth: &MockAuth, course_id: Uuid, title: &str) -> Uuid {
        let response = authed(
            self.server.post(&format!("/courses/{course_id}/sections")),
            auth,
        )
        .json(&json!({"sectionTitle": title}))
        .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }

    pub async fn create_lesson(
        &self,
        auth: &MockAuth,
        section_id: Uuid,
        title: &str,
        order: Option<u32>,
    ) -> Uuid {
        let response = authed(
            self.server.post(&format!("/sections/{section_id}/lessons")),
            auth,
        )
        .json(&json!({"title": title, "orderInSection": order}))
        .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }

    pub async fn create_quiz(
        &self,
        auth: &MockAuth,
        section_id: Uuid,
        title: &str,
        order: Option<u32>,
    ) -> Uuid {
        let response = authed(
            self.server.post(&format!("/sections/{section_id}/quizzes")),
            auth,
        )
        .json(&json!({"title": title, "orderInSection": order}))
        .await;
        assert_eq!(response.status_code(), StatusCode::CREATED);
        id_of(&response.json::<Value>())
    }
}

pub fn course_body(title: &str, categories: &[&str]) -> Value {
    json!({
        "title": title,
        "headline": "Learn by building",
        "description": {"summary": "From zero to shipping", "weeks": 6},
        "level": "beginner",
        "language": "en",
        "price": 19.99,
        "whatYouWillLearn": ["Ownership", "Traits", "Async"],
        "categories": categories,
    })
}

pub fn id_of(body: &Value) -> Uuid {
    body["id"].as_str().unwrap().parse().unwrap()
}
