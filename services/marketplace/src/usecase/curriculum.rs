use uuid::Uuid;

use ucademic_core::error::GatewayError;

use crate::domain::repository::{CourseRepository, CurriculumRepository, UserRepository};
use crate::domain::types::{
    Lesson, LessonResource, LessonUpdate, NewLesson, Quiz, QuizQuestion, Section,
};
use crate::error::MarketplaceError;
use crate::usecase::course::owned_course;
use crate::usecase::user::current_user;

fn require_text(value: &str, field: &str) -> Result<(), MarketplaceError> {
    if value.trim().is_empty() {
        return Err(MarketplaceError::InvalidInput(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}

/// Ordering keys share the `i32` column range of the store.
fn require_order_key(order: Option<u32>) -> Result<(), MarketplaceError> {
    match order {
        Some(order) if i32::try_from(order).is_err() => Err(MarketplaceError::InvalidInput(
            format!("orderInSection must be at most {}", i32::MAX),
        )),
        _ => Ok(()),
    }
}

/// Section, lesson and quiz management. Writes require the caller to own
/// the course.
pub struct CurriculumUseCase<U: UserRepository, C: CourseRepository, K: CurriculumRepository> {
    pub users: U,
    pub courses: C,
    pub curriculum: K,
}

impl<U, C, K> CurriculumUseCase<U, C, K>
where
    U: UserRepository,
    C: CourseRepository,
    K: CurriculumRepository,
{
    /// Load a section whose course the caller owns.
    async fn owned_section(&self, user_id: Uuid, section_id: Uuid) -> Result<Section, MarketplaceError> {
        current_user(&self.users, user_id).await?;
        let section = self
            .curriculum
            .find_section(section_id)
            .await?
            .ok_or(GatewayError::NotFound("Section"))?;
        owned_course(&self.courses, section.course_id, user_id).await?;
        Ok(section)
    }

    async fn lesson(&self, lesson_id: Uuid) -> Result<Lesson, MarketplaceError> {
        Ok(self
            .curriculum
            .find_lesson(lesson_id)
            .await?
            .ok_or(GatewayError::NotFound("Lesson"))?)
    }

    async fn quiz(&self, quiz_id: Uuid) -> Result<Quiz, MarketplaceError> {
        Ok(self
            .curriculum
            .find_quiz(quiz_id)
            .await?
            .ok_or(GatewayError::NotFound("Quiz"))?)
    }

    // ── Sections ─────────────────────────────────────────────────────────────

    pub async fn create_section(
        &self,
        user_id: Uuid,
        course_id: Uuid,
        title: &str,
    ) -> Result<Section, MarketplaceError> {
        require_text(title, "section title")?;
        current_user(&self.users, user_id).await?;
        owned_course(&self.courses, course_id, user_id).await?;
        self.curriculum.create_section(course_id, title).await
    }

    pub async fn rename_section(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        title: &str,
    ) -> Result<Section, MarketplaceError> {
        require_text(title, "section title")?;
        self.owned_section(user_id, section_id).await?;
        self.curriculum.rename_section(section_id, title).await
    }

    // ── Lessons ──────────────────────────────────────────────────────────────

    pub async fn create_lesson(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        lesson: NewLesson,
    ) -> Result<Lesson, MarketplaceError> {
        require_text(&lesson.title, "lesson title")?;
        require_order_key(lesson.order_in_section)?;
        self.owned_section(user_id, section_id).await?;
        self.curriculum.create_lesson(section_id, &lesson).await
    }

    pub async fn update_lesson(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        update: LessonUpdate,
    ) -> Result<Lesson, MarketplaceError> {
        if update.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        if let Some(ref title) = update.title {
            require_text(title, "lesson title")?;
        }
        require_order_key(update.order_in_section.flatten())?;
        let lesson = self.lesson(lesson_id).await?;
        self.owned_section(user_id, lesson.section_id).await?;
        self.curriculum.update_lesson(lesson_id, &update).await
    }

    /// Attach a processed video to a lesson and fold its duration into the
    /// section totals.
    pub async fn attach_video(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        link: &str,
        duration_seconds: i32,
    ) -> Result<(Lesson, Section), MarketplaceError> {
        require_text(link, "video link")?;
        if duration_seconds < 0 {
            return Err(MarketplaceError::InvalidInput(
                "duration must not be negative".into(),
            ));
        }
        let lesson = self.lesson(lesson_id).await?;
        let mut section = self.owned_section(user_id, lesson.section_id).await?;

        section.record_video(lesson.duration, duration_seconds)?;
        let updated = self
            .curriculum
            .set_lesson_video(lesson_id, link, duration_seconds)
            .await?;
        let section = self.curriculum.save_section_totals(&section).await?;
        tracing::info!(
            %lesson_id,
            section_id = %section.id,
            duration = duration_seconds,
            "lesson video attached"
        );
        Ok((updated, section))
    }

    pub async fn add_resource(
        &self,
        user_id: Uuid,
        lesson_id: Uuid,
        name: &str,
        link: &str,
    ) -> Result<LessonResource, MarketplaceError> {
        require_text(name, "resource name")?;
        require_text(link, "resource link")?;
        let lesson = self.lesson(lesson_id).await?;
        self.owned_section(user_id, lesson.section_id).await?;
        self.curriculum.create_resource(lesson_id, name, link).await
    }

    pub async fn list_resources(
        &self,
        lesson_id: Uuid,
    ) -> Result<Vec<LessonResource>, MarketplaceError> {
        self.lesson(lesson_id).await?;
        self.curriculum.list_resources(lesson_id).await
    }

    // ── Quizzes ──────────────────────────────────────────────────────────────

    pub async fn create_quiz(
        &self,
        user_id: Uuid,
        section_id: Uuid,
        title: &str,
        order_in_section: Option<u32>,
    ) -> Result<Quiz, MarketplaceError> {
        require_text(title, "quiz title")?;
        require_order_key(order_in_section)?;
        self.owned_section(user_id, section_id).await?;
        self.curriculum
            .create_quiz(section_id, title, order_in_section)
            .await
    }

    pub async fn quiz_with_questions(
        &self,
        quiz_id: Uuid,
    ) -> Result<(Quiz, Vec<QuizQuestion>), MarketplaceError> {
        let quiz = self.quiz(quiz_id).await?;
        let questions = self.curriculum.list_questions(quiz_id).await?;
        Ok((quiz, questions))
    }

    pub async fn add_question(
        &self,
        user_id: Uuid,
        quiz_id: Uuid,
        question: &str,
        options: &[String],
        answer: u32,
    ) -> Result<QuizQuestion, MarketplaceError> {
        require_text(question, "question")?;
        if options.is_empty() {
            return Err(MarketplaceError::InvalidInput(
                "a question needs at least one option".into(),
            ));
        }
        if answer as usize >= options.len() {
            return Err(MarketplaceError::InvalidInput(
                "answer must index one of the options".into(),
            ));
        }
        let quiz = self.quiz(quiz_id).await?;
        self.owned_section(user_id, quiz.section_id).await?;
        self.curriculum
            .add_question(quiz_id, question, options, answer)
            .await
    }
}
