use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use ucademic_auth_types::identity::JwtSecret;

use crate::infra::db::{
    DbCategoryRepository, DbCourseRepository, DbCurriculumRepository, DbUserRepository,
};
use crate::usecase::auth::TokenIssuer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: JwtSecret,
    pub access_token_ttl_seconds: u64,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn category_repo(&self) -> DbCategoryRepository {
        DbCategoryRepository {
            db: self.db.clone(),
        }
    }

    pub fn course_repo(&self) -> DbCourseRepository {
        DbCourseRepository {
            db: self.db.clone(),
        }
    }

    pub fn curriculum_repo(&self) -> DbCurriculumRepository {
        DbCurriculumRepository {
            db: self.db.clone(),
        }
    }

    pub fn token_issuer(&self) -> TokenIssuer {
        TokenIssuer {
            secret: self.jwt_secret.clone(),
            ttl_seconds: self.access_token_ttl_seconds,
        }
    }
}

impl FromRef<AppState> for JwtSecret {
    fn from_ref(state: &AppState) -> Self {
        state.jwt_secret.clone()
    }
}
