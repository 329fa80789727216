use std::collections::BTreeSet;

use serde_json::Value;
use uuid::Uuid;

use ucademic_core::error::GatewayError;
use ucademic_domain::codec::CodecError;
use ucademic_domain::course::{CourseLanguage, CourseLevel, price_to_cents, validate_title};
use ucademic_domain::pagination::PageRequest;

use crate::domain::repository::{
    CategoryRepository, CourseRepository, CurriculumRepository, UserRepository,
};
use crate::domain::types::{Course, CourseDetail, CourseListing, CourseUpdate, NewCourse};
use crate::error::MarketplaceError;
use crate::usecase::user::{current_user, require_instructor};

fn ensure_object(value: Option<&Value>) -> Result<(), MarketplaceError> {
    match value {
        Some(v) if !v.is_object() => Err(CodecError::NotAnObject.into()),
        _ => Ok(()),
    }
}

/// Resolve category names to ids. Every name must exist.
async fn resolve_categories<R: CategoryRepository>(
    repo: &R,
    names: &[String],
) -> Result<Vec<Uuid>, MarketplaceError> {
    let wanted: BTreeSet<&str> = names.iter().map(String::as_str).collect();
    let found = repo.find_by_names(names).await?;
    if found.len() != wanted.len() {
        return Err(GatewayError::NotFound("Category").into());
    }
    Ok(found.into_iter().map(|c| c.id).collect())
}

/// Load a course the caller owns.
pub(crate) async fn owned_course<C: CourseRepository>(
    courses: &C,
    course_id: Uuid,
    user_id: Uuid,
) -> Result<Course, MarketplaceError> {
    let course = courses
        .find_by_id(course_id)
        .await?
        .ok_or(GatewayError::NotFound("Course"))?;
    if course.instructor_id != user_id {
        return Err(MarketplaceError::Forbidden);
    }
    Ok(course)
}

// ── ListCourses ──────────────────────────────────────────────────────────────

pub struct ListCoursesUseCase<C: CourseRepository> {
    pub courses: C,
}

impl<C: CourseRepository> ListCoursesUseCase<C> {
    pub async fn execute(&self, page: PageRequest) -> Result<Vec<CourseListing>, MarketplaceError> {
        self.courses.list(page.clamped()).await
    }
}

// ── GetCourseDetail ──────────────────────────────────────────────────────────

pub struct GetCourseDetailUseCase<C: CourseRepository, K: CurriculumRepository> {
    pub courses: C,
    pub curriculum: K,
}

impl<C: CourseRepository, K: CurriculumRepository> GetCourseDetailUseCase<C, K> {
    pub async fn execute(&self, course_id: Uuid) -> Result<CourseDetail, MarketplaceError> {
        let listing = self.courses.find_listing(course_id).await?;
        let sections = self.curriculum.section_contents(course_id).await?;
        Ok(CourseDetail { listing, sections })
    }
}

// ── CreateCourse ─────────────────────────────────────────────────────────────

pub struct CreateCourseInput {
    pub title: String,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: CourseLevel,
    pub language: CourseLanguage,
    pub price: f64,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
    pub categories: Vec<String>,
}

pub struct CreateCourseUseCase<U: UserRepository, G: CategoryRepository, C: CourseRepository> {
    pub users: U,
    pub categories: G,
    pub courses: C,
}

impl<U, G, C> CreateCourseUseCase<U, G, C>
where
    U: UserRepository,
    G: CategoryRepository,
    C: CourseRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: CreateCourseInput,
    ) -> Result<CourseListing, MarketplaceError> {
        let instructor = require_instructor(&self.users, user_id).await?;
        validate_title(&input.title)?;
        ensure_object(input.description.as_ref())?;
        let price_cents = price_to_cents(input.price)?;
        let category_ids = resolve_categories(&self.categories, &input.categories).await?;

        let course = self
            .courses
            .create(
                &NewCourse {
                    title: input.title,
                    headline: input.headline,
                    description: input.description,
                    level: input.level,
                    language: input.language,
                    price_cents,
                    thumbnail: input.thumbnail,
                    requirements: input.requirements,
                    what_you_will_learn: input.what_you_will_learn,
                    instructor_id: instructor.id,
                },
                &category_ids,
            )
            .await?;
        tracing::info!(course_id = %course.id, instructor_id = %instructor.id, "course created");
        self.courses.find_listing(course.id).await
    }
}

// ── UpdateCourse ─────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateCourseInput {
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

pub struct UpdateCourseUseCase<U: UserRepository, G: CategoryRepository, C: CourseRepository> {
    pub users: U,
    pub categories: G,
    pub courses: C,
}

impl<U, G, C> UpdateCourseUseCase<U, G, C>
where
    U: UserRepository,
    G: CategoryRepository,
    C: CourseRepository,
{
    pub async fn execute(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        input: UpdateCourseInput,
    ) -> Result<CourseListing, MarketplaceError> {
        let update = CourseUpdate {
            title: input.title,
            headline: input.headline,
            description: input.description,
            level: input.level,
            language: input.language,
            price_cents: input.price.map(price_to_cents).transpose()?,
            thumbnail: input.thumbnail,
            requirements: input.requirements,
            what_you_will_learn: input.what_you_will_learn,
        };
        if update.is_empty() && input.categories.is_none() {
            return Err(MarketplaceError::MissingData);
        }
        if let Some(ref title) = update.title {
            validate_title(title)?;
        }
        ensure_object(update.description.as_ref())?;

        current_user(&self.users, user_id).await?;
        owned_course(&self.courses, course_id, user_id).await?;
        let category_ids = match input.categories {
            Some(ref names) => Some(resolve_categories(&self.categories, names).await?),
            None => None,
        };
        self.courses
            .update(course_id, &update, category_ids.as_deref())
            .await?;
        self.courses.find_listing(course_id).await
    }
}

// ── Enroll ───────────────────────────────────────────────────────────────────

pub struct EnrollUseCase<U: UserRepository, C: CourseRepository> {
    pub users: U,
    pub courses: C,
}

impl<U: UserRepository, C: CourseRepository> EnrollUseCase<U, C> {
    pub async fn execute(&self, user_id: Uuid, course_id: Uuid) -> Result<(), MarketplaceError> {
        current_user(&self.users, user_id).await?;
        self.courses.enroll(user_id, course_id).await?;
        tracing::info!(%user_id, %course_id, "user enrolled");
        Ok(())
    }
}
