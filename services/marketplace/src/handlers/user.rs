use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use ucademic_auth_types::identity::BearerIdentity;
use ucademic_domain::user::Gender;

use crate::domain::types::{ProfileUpdate, User};
use crate::error::MarketplaceError;
use crate::handlers::course::CourseResponse;
use crate::state::AppState;
use crate::usecase::user::{
    BecomeInstructorUseCase, EnrolledCoursesUseCase, GetMeUseCase, UpdateProfileUseCase,
};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<Value>,
    pub avatar_link: Option<String>,
    pub is_instructor: bool,
    #[serde(serialize_with = "ucademic_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            phone_number: user.phone_number,
            date_of_birth: user.date_of_birth,
            gender: user.gender,
            bio: user.bio,
            avatar_link: user.avatar_link,
            is_instructor: user.is_instructor,
            created_at: user.created_at,
        }
    }
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: BearerIdentity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, MarketplaceError> {
    let usecase = GetMeUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── PATCH /users/@me/profile ─────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<Value>,
    pub avatar_link: Option<String>,
}

pub async fn update_profile(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>, MarketplaceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.user_repo(),
    };
    let user = usecase
        .execute(
            identity.user_id,
            ProfileUpdate {
                full_name: body.full_name,
                phone_number: body.phone_number,
                date_of_birth: body.date_of_birth,
                gender: body.gender,
                bio: body.bio,
                avatar_link: body.avatar_link,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── POST /users/@me/instructor ───────────────────────────────────────────────

pub async fn become_instructor(
    identity: BearerIdentity,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, MarketplaceError> {
    let usecase = BecomeInstructorUseCase {
        repo: state.user_repo(),
    };
    let user = usecase.execute(identity.user_id).await?;
    Ok(Json(user.into()))
}

// ── GET /users/@me/courses ───────────────────────────────────────────────────

pub async fn my_courses(
    identity: BearerIdentity,
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseResponse>>, MarketplaceError> {
    let usecase = EnrolledCoursesUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
    };
    let listings = usecase.execute(identity.user_id).await?;
    Ok(Json(listings.into_iter().map(Into::into).collect()))
}
