use axum::{
    Router,
    http::{HeaderValue, Method, header, header::InvalidHeaderValue},
    routing::{get, patch, post, put},
};
use tower_http::cors::CorsLayer;

use ucademic_core::health::healthz;
use ucademic_core::middleware::{propagate_request_id_layer, request_id_layer, trace_layer};

use crate::handlers::{
    auth::{login, register},
    category::{create_category, list_categories},
    course::{create_course, enroll, get_course, list_courses, update_course},
    curriculum::{
        add_question, add_resource, attach_video, create_lesson, create_quiz, create_section,
        get_quiz, list_resources, rename_section, update_lesson,
    },
    health::readyz,
    user::{become_instructor, get_me, my_courses, update_profile},
};
use crate::state::AppState;

/// CORS for the single browser client origin.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, InvalidHeaderValue> {
    Ok(CorsLayer::new()
        .allow_origin(origin.parse::<HeaderValue>()?)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .allow_credentials(true))
}

pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        // Users
        .route("/users/@me", get(get_me))
        .route("/users/@me/profile", patch(update_profile))
        .route("/users/@me/instructor", post(become_instructor))
        .route("/users/@me/courses", get(my_courses))
        // Categories
        .route("/categories", get(list_categories).post(create_category))
        // Courses
        .route("/courses", get(list_courses).post(create_course))
        .route("/courses/{id}", get(get_course).patch(update_course))
        .route("/courses/{id}/enroll", post(enroll))
        .route("/courses/{id}/sections", post(create_section))
        // Sections
        .route("/sections/{id}", patch(rename_section))
        .route("/sections/{id}/lessons", post(create_lesson))
        .route("/sections/{id}/quizzes", post(create_quiz))
        // Lessons
        .route("/lessons/{id}", patch(update_lesson))
        .route("/lessons/{id}/video", put(attach_video))
        .route(
            "/lessons/{id}/resources",
            get(list_resources).post(add_resource),
        )
        // Quizzes
        .route("/quizzes/{id}", get(get_quiz))
        .route("/quizzes/{id}/questions", post(add_question))
        .with_state(state)
        .layer(cors)
        .layer(trace_layer())
        .layer(propagate_request_id_layer())
        .layer(request_id_layer())
}
