use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use uuid::Uuid;

use ucademic_domain::course::{CourseLanguage, CourseLevel};
use ucademic_domain::section_content::Ordered;
use ucademic_domain::user::Gender;

use crate::error::MarketplaceError;

// ── Users ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub hashed_password: String,
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<Value>,
    pub avatar_link: Option<String>,
    pub is_instructor: bool,
    pub created_at: DateTime<Utc>,
}

/// Partial profile update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<Gender>,
    pub bio: Option<Value>,
    pub avatar_link: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.phone_number.is_none()
            && self.date_of_birth.is_none()
            && self.gender.is_none()
            && self.bio.is_none()
            && self.avatar_link.is_none()
    }
}

// ── Catalog ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct Course {
    pub id: Uuid,
    pub title: String,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: CourseLevel,
    pub language: CourseLanguage,
    pub price_cents: i64,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
    pub rating: Option<f64>,
    pub instructor_id: Uuid,
    pub last_updated: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

/// A course with the aggregates shown in listings.
#[derive(Debug, Clone)]
pub struct CourseListing {
    pub course: Course,
    pub categories: Vec<String>,
    pub students: u64,
}

#[derive(Debug, Clone)]
pub struct NewCourse {
    pub title: String,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: CourseLevel,
    pub language: CourseLanguage,
    pub price_cents: i64,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
    pub instructor_id: Uuid,
}

/// Partial course update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub headline: Option<String>,
    pub description: Option<Value>,
    pub level: Option<CourseLevel>,
    pub language: Option<CourseLanguage>,
    pub price_cents: Option<i64>,
    pub thumbnail: Option<String>,
    pub requirements: Option<String>,
    pub what_you_will_learn: Option<Vec<String>>,
}

impl CourseUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.headline.is_none()
            && self.description.is_none()
            && self.level.is_none()
            && self.language.is_none()
            && self.price_cents.is_none()
            && self.thumbnail.is_none()
            && self.requirements.is_none()
            && self.what_you_will_learn.is_none()
    }
}

// ── Curriculum ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub id: Uuid,
    pub course_id: Uuid,
    pub section_title: String,
    /// Total video seconds of the section's lessons.
    pub duration: Option<i32>,
    /// Number of lessons with a video.
    pub lessons: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Section {
    /// Account for a video attached to one of this section's lessons.
    ///
    /// `previous` is the lesson's duration before the attach; a lesson that
    /// already had a video is replaced in the totals rather than counted twice.
    /// Totals that would leave the `i32` column range are rejected and the
    /// section is left untouched.
    pub fn record_video(
        &mut self,
        previous: Option<i32>,
        duration: i32,
    ) -> Result<(), MarketplaceError> {
        let previous = previous.filter(|d| *d != 0);
        let total = match self.duration {
            Some(total) => total
                .checked_sub(previous.unwrap_or(0))
                .and_then(|rest| rest.checked_add(duration)),
            None => Some(duration),
        }
        .ok_or_else(|| {
            MarketplaceError::InvalidInput("section duration exceeds the supported range".into())
        })?;
        let lessons = match (self.lessons, previous) {
            (None, _) => Some(1),
            (Some(count), None) => count.checked_add(1),
            (Some(count), Some(_)) => Some(count),
        }
        .ok_or_else(|| MarketplaceError::InvalidInput("too many lessons in section".into()))?;
        self.duration = Some(total);
        self.lessons = Some(lessons);
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lesson {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub duration: Option<i32>,
    pub free_preview: bool,
    pub link: Option<String>,
    pub order_in_section: Option<u32>,
}

impl Ordered for Lesson {
    fn ordering_key(&self) -> Option<u32> {
        self.order_in_section
    }
}

#[derive(Debug, Clone)]
pub struct NewLesson {
    pub title: String,
    pub free_preview: bool,
    pub order_in_section: Option<u32>,
}

/// `order_in_section` is `Some(None)` when the caller clears the key.
#[derive(Debug, Clone, Default)]
pub struct LessonUpdate {
    pub title: Option<String>,
    pub free_preview: Option<bool>,
    pub order_in_section: Option<Option<u32>>,
}

impl LessonUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.free_preview.is_none() && self.order_in_section.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonResource {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub name: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub order_in_section: Option<u32>,
}

impl Ordered for Quiz {
    fn ordering_key(&self) -> Option<u32> {
        self.order_in_section
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub answer: u32,
}

/// A section with its lessons and quizzes, each sorted by ordering key with
/// unkeyed items first.
#[derive(Debug, Clone)]
pub struct SectionContents {
    pub section: Section,
    pub lessons: Vec<Lesson>,
    pub quizzes: Vec<Quiz>,
}

#[derive(Debug, Clone)]
pub struct CourseDetail {
    pub listing: CourseListing,
    pub sections: Vec<SectionContents>,
}
