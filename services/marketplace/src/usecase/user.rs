use chrono::Utc;
use uuid::Uuid;

use ucademic_domain::codec::CodecError;
use ucademic_domain::user::{validate_date_of_birth, validate_phone_number};

use crate::domain::repository::{CourseRepository, UserRepository};
use crate::domain::types::{CourseListing, ProfileUpdate, User};
use crate::error::MarketplaceError;

/// Load the caller. A valid token whose user is gone is unauthenticated.
pub(crate) async fn current_user<R: UserRepository>(
    repo: &R,
    user_id: Uuid,
) -> Result<User, MarketplaceError> {
    repo.find_by_id(user_id)
        .await?
        .ok_or(MarketplaceError::Unauthenticated)
}

pub(crate) async fn require_instructor<R: UserRepository>(
    repo: &R,
    user_id: Uuid,
) -> Result<User, MarketplaceError> {
    let user = current_user(repo, user_id).await?;
    if !user.is_instructor {
        return Err(MarketplaceError::NotInstructor);
    }
    Ok(user)
}

// ── GetMe ────────────────────────────────────────────────────────────────────

pub struct GetMeUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> GetMeUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, MarketplaceError> {
        current_user(&self.repo, user_id).await
    }
}

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> UpdateProfileUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        update: ProfileUpdate,
    ) -> Result<User, MarketplaceError> {
        if update.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        if let Some(ref phone_number) = update.phone_number {
            validate_phone_number(phone_number)?;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            validate_date_of_birth(date_of_birth, Utc::now().date_naive())?;
        }
        if let Some(ref bio) = update.bio {
            if !bio.is_object() {
                return Err(CodecError::NotAnObject.into());
            }
        }
        current_user(&self.repo, user_id).await?;
        self.repo.update_profile(user_id, &update).await
    }
}

// ── BecomeInstructor ─────────────────────────────────────────────────────────

pub struct BecomeInstructorUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> BecomeInstructorUseCase<R> {
    pub async fn execute(&self, user_id: Uuid) -> Result<User, MarketplaceError> {
        let user = current_user(&self.repo, user_id).await?;
        if user.is_instructor {
            return Ok(user);
        }
        self.repo.set_instructor(user_id).await
    }
}

// ── EnrolledCourses ──────────────────────────────────────────────────────────

pub struct EnrolledCoursesUseCase<U: UserRepository, C: CourseRepository> {
    pub users: U,
    pub courses: C,
}

impl<U: UserRepository, C: CourseRepository> EnrolledCoursesUseCase<U, C> {
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<CourseListing>, MarketplaceError> {
        current_user(&self.users, user_id).await?;
        self.courses.enrolled(user_id).await
    }
}
