use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ucademic_auth_types::identity::BearerIdentity;
use ucademic_domain::course::format_duration;
use ucademic_domain::section_content::{SectionItem, merge_section_contents};

use crate::domain::types::{
    Lesson, LessonResource, LessonUpdate, NewLesson, Quiz, QuizQuestion, Section,
    SectionContents,
};
use crate::error::MarketplaceError;
use crate::infra::db::{DbCourseRepository, DbCurriculumRepository, DbUserRepository};
use crate::state::AppState;
use crate::usecase::curriculum::CurriculumUseCase;

type Curriculum = CurriculumUseCase<DbUserRepository, DbCourseRepository, DbCurriculumRepository>;

fn curriculum(state: &AppState) -> Curriculum {
    CurriculumUseCase {
        users: state.user_repo(),
        courses: state.course_repo(),
        curriculum: state.curriculum_repo(),
    }
}

// ── Responses ────────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonResponse {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub duration: Option<i32>,
    pub free_preview: bool,
    pub link: Option<String>,
    pub order_in_section: Option<u32>,
}

impl From<Lesson> for LessonResponse {
    fn from(lesson: Lesson) -> Self {
        Self {
            id: lesson.id,
            section_id: lesson.section_id,
            title: lesson.title,
            duration: lesson.duration,
            free_preview: lesson.free_preview,
            link: lesson.link,
            order_in_section: lesson.order_in_section,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub id: Uuid,
    pub section_id: Uuid,
    pub title: String,
    pub order_in_section: Option<u32>,
}

impl From<Quiz> for QuizResponse {
    fn from(quiz: Quiz) -> Self {
        Self {
            id: quiz.id,
            section_id: quiz.section_id,
            title: quiz.title,
            order_in_section: quiz.order_in_section,
        }
    }
}

pub type SectionItemResponse = SectionItem<LessonResponse, QuizResponse>;

/// Section totals, plus its merged lessons and quizzes on course detail.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub section_title: String,
    pub duration: String,
    pub lessons: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<SectionItemResponse>>,
}

impl SectionResponse {
    pub fn with_contents(contents: SectionContents) -> Self {
        let items = merge_section_contents(contents.lessons, contents.quizzes)
            .into_iter()
            .map(|item| match item {
                SectionItem::Lesson(lesson) => SectionItem::Lesson(lesson.into()),
                SectionItem::Quiz(quiz) => SectionItem::Quiz(quiz.into()),
            })
            .collect();
        Self {
            contents: Some(items),
            ..contents.section.into()
        }
    }
}

impl From<Section> for SectionResponse {
    fn from(section: Section) -> Self {
        Self {
            id: section.id,
            course_id: section.course_id,
            section_title: section.section_title,
            duration: format_duration(i64::from(section.duration.unwrap_or(0))),
            lessons: section.lessons.unwrap_or(0),
            contents: None,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceResponse {
    pub id: Uuid,
    pub lesson_id: Uuid,
    pub name: String,
    pub link: String,
}

impl From<LessonResource> for ResourceResponse {
    fn from(resource: LessonResource) -> Self {
        Self {
            id: resource.id,
            lesson_id: resource.lesson_id,
            name: resource.name,
            link: resource.link,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub id: Uuid,
    pub quiz_id: Uuid,
    pub question: String,
    pub options: Vec<String>,
    pub answer: u32,
}

impl From<QuizQuestion> for QuestionResponse {
    fn from(question: QuizQuestion) -> Self {
        Self {
            id: question.id,
            quiz_id: question.quiz_id,
            question: question.question,
            options: question.options,
            answer: question.answer,
        }
    }
}

// ── POST /courses/{id}/sections ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionRequest {
    pub section_title: String,
}

pub async fn create_section(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(course_id): Path<Uuid>,
    Json(body): Json<SectionRequest>,
) -> Result<(StatusCode, Json<SectionResponse>), MarketplaceError> {
    let section = curriculum(&state)
        .create_section(identity.user_id, course_id, &body.section_title)
        .await?;
    Ok((StatusCode::CREATED, Json(section.into())))
}

// ── PATCH /sections/{id} ─────────────────────────────────────────────────────

pub async fn rename_section(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<SectionRequest>,
) -> Result<Json<SectionResponse>, MarketplaceError> {
    let section = curriculum(&state)
        .rename_section(identity.user_id, section_id, &body.section_title)
        .await?;
    Ok(Json(section.into()))
}

// ── POST /sections/{id}/lessons ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub title: String,
    #[serde(default)]
    pub free_preview: bool,
    pub order_in_section: Option<u32>,
}

pub async fn create_lesson(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), MarketplaceError> {
    let lesson = curriculum(&state)
        .create_lesson(
            identity.user_id,
            section_id,
            NewLesson {
                title: body.title,
                free_preview: body.free_preview,
                order_in_section: body.order_in_section,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(lesson.into())))
}

// ── PATCH /lessons/{id} ──────────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub free_preview: Option<bool>,
    #[serde(default, deserialize_with = "ucademic_core::serde::double_option")]
    pub order_in_section: Option<Option<u32>>,
}

pub async fn update_lesson(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<UpdateLessonRequest>,
) -> Result<Json<LessonResponse>, MarketplaceError> {
    let lesson = curriculum(&state)
        .update_lesson(
            identity.user_id,
            lesson_id,
            LessonUpdate {
                title: body.title,
                free_preview: body.free_preview,
                order_in_section: body.order_in_section,
            },
        )
        .await?;
    Ok(Json(lesson.into()))
}

// ── PUT /lessons/{id}/video ──────────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachVideoRequest {
    pub link: String,
    pub duration_seconds: i32,
}

#[derive(Serialize)]
pub struct VideoAttachedResponse {
    pub lesson: LessonResponse,
    pub section: SectionResponse,
}

pub async fn attach_video(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<AttachVideoRequest>,
) -> Result<Json<VideoAttachedResponse>, MarketplaceError> {
    let (lesson, section) = curriculum(&state)
        .attach_video(identity.user_id, lesson_id, &body.link, body.duration_seconds)
        .await?;
    Ok(Json(VideoAttachedResponse {
        lesson: lesson.into(),
        section: section.into(),
    }))
}

// ── /lessons/{id}/resources ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResourceRequest {
    pub name: String,
    pub link: String,
}

pub async fn add_resource(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
    Json(body): Json<ResourceRequest>,
) -> Result<(StatusCode, Json<ResourceResponse>), MarketplaceError> {
    let resource = curriculum(&state)
        .add_resource(identity.user_id, lesson_id, &body.name, &body.link)
        .await?;
    Ok((StatusCode::CREATED, Json(resource.into())))
}

pub async fn list_resources(
    State(state): State<AppState>,
    Path(lesson_id): Path<Uuid>,
) -> Result<Json<Vec<ResourceResponse>>, MarketplaceError> {
    let resources = curriculum(&state).list_resources(lesson_id).await?;
    Ok(Json(resources.into_iter().map(Into::into).collect()))
}

// ── POST /sections/{id}/quizzes ──────────────────────────────────────────────

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuizRequest {
    pub title: String,
    pub order_in_section: Option<u32>,
}

pub async fn create_quiz(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(section_id): Path<Uuid>,
    Json(body): Json<CreateQuizRequest>,
) -> Result<(StatusCode, Json<QuizResponse>), MarketplaceError> {
    let quiz = curriculum(&state)
        .create_quiz(identity.user_id, section_id, &body.title, body.order_in_section)
        .await?;
    Ok((StatusCode::CREATED, Json(quiz.into())))
}

// ── GET /quizzes/{id} ────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct QuizDetailResponse {
    #[serde(flatten)]
    pub quiz: QuizResponse,
    pub questions: Vec<QuestionResponse>,
}

pub async fn get_quiz(
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
) -> Result<Json<QuizDetailResponse>, MarketplaceError> {
    let (quiz, questions) = curriculum(&state).quiz_with_questions(quiz_id).await?;
    Ok(Json(QuizDetailResponse {
        quiz: quiz.into(),
        questions: questions.into_iter().map(Into::into).collect(),
    }))
}

// ── POST /quizzes/{id}/questions ─────────────────────────────────────────────

#[derive(Deserialize)]
pub struct QuestionRequest {
    pub question: String,
    pub options: Vec<String>,
    pub answer: u32,
}

pub async fn add_question(
    identity: BearerIdentity,
    State(state): State<AppState>,
    Path(quiz_id): Path<Uuid>,
    Json(body): Json<QuestionRequest>,
) -> Result<(StatusCode, Json<QuestionResponse>), MarketplaceError> {
    let question = curriculum(&state)
        .add_question(
            identity.user_id,
            quiz_id,
            &body.question,
            &body.options,
            body.answer,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(question.into())))
}
