use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use ucademic_auth_types::identity::BearerIdentity;
use ucademic_domain::course::{CourseLanguage, CourseLevel, cents_to_price, format_duration};
use ucademic_domain::pagination::PageRequest;

use crate::domain::types::{CourseDetail, CourseListing};
use crate::error::MarketplaceError;
use crate::handlers::curriculum::SectionResponse;
use crate::state::AppState;
use crate::usecase::course::{
    CreateCourseInput, CreateCourseUseCase, EnrollUseCase, GetCourseDetailUseCase,
    ListCoursesUseCase, UpdateCourseInput, UpdateCourseUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: Uuid,
    pub title: String,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: CourseLevel,
    pub language: CourseLanguage,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Vec<String>,
    pub rating: Option<f64>,
    pub instructor_id: Uuid,
    pub categories: Vec<String>,
    pub students: u64,
    #[serde(serialize_with = "ucademic_core::serde::to_rfc3339_ms_opt")]
    pub last_updated: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "ucademic_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<CourseListing> for CourseResponse {
    fn from(listing: CourseListing) -> Self {
        let CourseListing {
            course,
            categories,
            students,
        } = listing;
        Self {
            id: course.id,
            title: course.title,
            headline: course.headline,
            description: course.description,
            level: course.level,
            language: course.language,
            price: cents_to_price(course.price_cents),
            thumbnail: course.thumbnail,
            requirements: course.requirements,
            what_you_will_learn: course.what_you_will_learn.unwrap_or_default(),
            rating: course.rating,
            instructor_id: course.instructor_id,
            categories,
            students,
            last_updated: course.last_updated,
            created_at: course.created_at,
        }
    }
}

/// A course with its curriculum and totals across all sections.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub duration: String,
    pub lessons: i64,
    pub contents: Vec<SectionResponse>,
}

impl From<CourseDetail> for CourseDetailResponse {
    fn from(detail: CourseDetail) -> Self {
        let seconds: i64 = detail
            .sections
            .iter()
            .map(|s| i64::from(s.section.duration.unwrap_or(0)))
            .sum();
        let lessons: i64 = detail
            .sections
            .iter()
            .map(|s| i64::from(s.section.lessons.unwrap_or(0)))
            .sum();
        Self {
            course: detail.listing.into(),
            duration: format_duration(seconds),
            lessons,
            contents: detail
                .sections
                .into_iter()
                .map(SectionResponse::with_contents)
                .collect(),
        }
    }
}

// ── GET /courses ─────────────────────────────────────────────────────────────

pub async fn list_courses(
    State(state): State<AppState>,
    Query(page): Query<PageRequest>,
) -> Result<Json<Vec<CourseResponse>>, MarketplaceError> {
    let usecase = ListCoursesUseCase {
        courses: state.course_repo(),
    };
    let listings = usecase.execute(page).await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}

// ── GET /courses/{id} ────────────────────────────────────────────────────────

pub async fn get_course(
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<Json<CourseDetailResponse>, MarketplaceError> {
    let usecase = GetCourseDetailUseCase {
        courses: state.course_repo(),
        curriculum: state.curriculum_repo(),
    };
    let detail = usecase.execute(course_id).await?;
    Ok(Json(detail.into()))
}

// ── POST /courses ────────────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCourseRequest {
    pub title: String,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: CourseLevel,
    pub language: CourseLanguage,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
    #[serde(default)]
    pub categories: Vec<String>,
}

pub async fn create_course(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Json(body): Json<CreateCourseRequest>,
) -> Result<(StatusCode, Json<CourseResponse>), MarketplaceError> {
    let usecase = CreateCourseUseCase {
        users: state.user_repo(),
        categories: state.category_repo(),
        courses: state.course_repo(),
    };
    let listing = usecase
        .execute(
            identity.user_id,
            CreateCourseInput {
                title: body.title,
                headline: body.headline,
                description: body.description,
                level: body.level,
                language: body.language,
                price: body.price,
                thumbnail: body.thumbnail,
                requirements: body.requirements,
                what_you_will_learn: body.what_you_will_learn,
                categories: body.categories,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(listing.into())))
}

// ── PATCH /courses/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCourseRequest {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: Option<CourseLevel>,
    pub language: Option<CourseLanguage>,
    pub price: Option<f64>,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
}

pub async fn update_course(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<UpdateCourseRequest>,
) -> Result<Json<CourseResponse>, MarketplaceError> {
    let usecase = UpdateCourseUseCase {
        users: state.user_repo(),
        categories: state.category_repo(),
        courses: state.course_repo(),
    };
    let listing = usecase
        .execute(
            identity.user_id,
            course_id,
            UpdateCourseInput {
                title: body.title,
                headline: body.headline,
                description: body.description,
                level: body.level,
                language: body.language,
                price: body.price,
                thumbnail: body.thumbnail,
                requirements: body.requirements,
                what_you_will_learn: body.what_you_will_learn,
                categories: body.categories,
            },
        )
        .await?;
    Ok(Json(listing.into()))
}

// ── POST /courses/{id}/enroll ────────────────────────────────────────────────

pub async fn enroll(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = EnrollUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    usecase.execute(identity.user_id, course_id).await?;
    Ok(StatusCode::CREATED)
}
