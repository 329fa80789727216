#![allow(async_fn_in_trait)]

use uuid::Uuid;

use ucademic_domain::pagination::Page;

use crate::domain::types::{
    Category, Course, CourseListing, CourseUpdate, Lesson, LessonResource, LessonUpdate,
    NewCourse, NewLesson, ProfileUpdate, Quiz, QuizQuestion, Section, SectionContents, User,
};
use crate::error::MarketplaceError;

/// Repository for user accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketplaceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError>;
    /// Fails with `AlreadyExists` when the email is taken.
    async fn create(&self, email: &str, hashed_password: &str) -> Result<User, MarketplaceError>;
    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<User, MarketplaceError>;
    async fn set_instructor(&self, id: Uuid) -> Result<User, MarketplaceError>;
}

/// Repository for course categories.
pub trait CategoryRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Category>, MarketplaceError>;
    /// Fails with `AlreadyExists` when the name is taken.
    async fn create(&self, name: &str) -> Result<Category, MarketplaceError>;
    /// Categories whose name is in `names`; unknown names are skipped.
    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, MarketplaceError>;
}

/// Repository for courses, their category links and enrollments.
pub trait CourseRepository: Send + Sync {
    async fn list(&self, page: Page) -> Result<Vec<CourseListing>, MarketplaceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, MarketplaceError>;
    /// Fails with `NotFound` when the course does not exist.
    async fn find_listing(&self, id: Uuid) -> Result<CourseListing, MarketplaceError>;
    /// Fails with `AlreadyExists` when the instructor already has a course
    /// with this title.
    async fn create(
        &self,
        course: &NewCourse,
        category_ids: &[Uuid],
    ) -> Result<Course, MarketplaceError>;
    /// `category_ids` replaces the course's categories when given.
    async fn update(
        &self,
        id: Uuid,
        update: &CourseUpdate,
        category_ids: Option<&[Uuid]>,
    ) -> Result<Course, MarketplaceError>;
    /// Fails with `AlreadyExists` when the user is already enrolled.
    async fn enroll(&self, user_id: Uuid, course_id: Uuid) -> Result<(), MarketplaceError>;
    async fn enrolled(&self, user_id: Uuid) -> Result<Vec<CourseListing>, MarketplaceError>;
}

/// Repository for sections, lessons, resources and quizzes.
pub trait CurriculumRepository: Send + Sync {
    async fn find_section(&self, id: Uuid) -> Result<Option<Section>, MarketplaceError>;
    /// Sections of a course in creation order, each with its sorted contents.
    async fn section_contents(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<SectionContents>, MarketplaceError>;
    async fn create_section(&self, course_id: Uuid, title: &str)
    -> Result<Section, MarketplaceError>;
    async fn rename_section(&self, id: Uuid, title: &str) -> Result<Section, MarketplaceError>;
    async fn save_section_totals(&self, section: &Section) -> Result<Section, MarketplaceError>;

    async fn find_lesson(&self, id: Uuid) -> Result<Option<Lesson>, MarketplaceError>;
    async fn create_lesson(
        &self,
        section_id: Uuid,
        lesson: &NewLesson,
    ) -> Result<Lesson, MarketplaceError>;
    async fn update_lesson(
        &self,
        id: Uuid,
        update: &LessonUpdate,
    ) -> Result<Lesson, MarketplaceError>;
    async fn set_lesson_video(
        &self,
        id: Uuid,
        link: &str,
        duration_seconds: i32,
    ) -> Result<Lesson, MarketplaceError>;

    async fn create_resource(
        &self,
        lesson_id: Uuid,
        name: &str,
        link: &str,
    ) -> Result<LessonResource, MarketplaceError>;
    async fn list_resources(&self, lesson_id: Uuid)
    -> Result<Vec<LessonResource>, MarketplaceError>;

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, MarketplaceError>;
    async fn create_quiz(
        &self,
        section_id: Uuid,
        title: &str,
        order_in_section: Option<u32>,
    ) -> Result<Quiz, MarketplaceError>;
    async fn add_question(
        &self,
        quiz_id: Uuid,
        question: &str,
        options: &[String],
        answer: u32,
    ) -> Result<QuizQuestion, MarketplaceError>;
    async fn list_questions(&self, quiz_id: Uuid) -> Result<Vec<QuizQuestion>, MarketplaceError>;
}
