use anyhow::Context as _;
use chrono::Utc;
use sea_orm::sea_query::NullOrdering;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel as _, Order,
    QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use ucademic_core::gateway::{FetchRequest, Gateway};
use ucademic_domain::codec::{decode_json_text, decode_list, encode_json_object, encode_list};
use ucademic_domain::pagination::Page;
use ucademic_domain::user::Gender;
use ucademic_marketplace_schema::{
    categories, course_categories, courses, lesson_resources, lessons, quiz_questions, quizzes,
    sections, user_courses, users,
};

use crate::domain::repository::{
    CategoryRepository, CourseRepository, CurriculumRepository, UserRepository,
};
use crate::domain::types::{
    Category, Course, CourseListing, CourseUpdate, Lesson, LessonResource, LessonUpdate,
    NewCourse, NewLesson, ProfileUpdate, Quiz, QuizQuestion, Section, SectionContents, User,
};
use crate::error::MarketplaceError;

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, MarketplaceError> {
        let user = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::<users::Entity>::by_id(id), user_from_model)
            .await?
            .into_one();
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, MarketplaceError> {
        let select = users::Entity::find().filter(users::Column::Email.eq(email));
        let user = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_one(select), user_from_model)
            .await?
            .into_one();
        Ok(user)
    }

    async fn create(&self, email: &str, hashed_password: &str) -> Result<User, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let taken = users::Entity::find().filter(users::Column::Email.eq(email));
        gateway
            .fetch(FetchRequest::query_one(taken).require_absent())
            .await?;

        let user = gateway
            .persist_projected(
                users::ActiveModel {
                    email: Set(email.to_owned()),
                    hashed_password: Set(hashed_password.to_owned()),
                    ..Default::default()
                },
                user_from_model,
            )
            .await?;
        Ok(user)
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<User, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<users::Entity>::by_id(id))
            .await?
            .into_active_model();
        if let Some(ref full_name) = update.full_name {
            am.full_name = Set(Some(full_name.clone()));
        }
        if let Some(ref phone_number) = update.phone_number {
            am.phone_number = Set(Some(phone_number.clone()));
        }
        if let Some(date_of_birth) = update.date_of_birth {
            am.date_of_birth = Set(Some(date_of_birth));
        }
        if let Some(gender) = update.gender {
            am.gender = Set(Some(gender.as_str().to_owned()));
        }
        if let Some(ref bio) = update.bio {
            am.bio = Set(Some(encode_json_object(bio)?));
        }
        if let Some(ref avatar_link) = update.avatar_link {
            am.avatar_link = Set(Some(avatar_link.clone()));
        }
        Ok(gateway.persist_projected(am, user_from_model).await?)
    }

    async fn set_instructor(&self, id: Uuid) -> Result<User, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<users::Entity>::by_id(id))
            .await?
            .into_active_model();
        am.is_instructor = Set(true);
        Ok(gateway.persist_projected(am, user_from_model).await?)
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        hashed_password: model.hashed_password,
        full_name: model.full_name,
        phone_number: model.phone_number,
        date_of_birth: model.date_of_birth,
        gender: model.gender.as_deref().and_then(Gender::from_stored),
        bio: model.bio.as_deref().map(decode_json_text),
        avatar_link: model.avatar_link,
        is_instructor: model.is_instructor,
        created_at: model.created_at,
    }
}

// ── Category repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCategoryRepository {
    pub db: DatabaseConnection,
}

impl CategoryRepository for DbCategoryRepository {
    async fn list(&self) -> Result<Vec<Category>, MarketplaceError> {
        let select = categories::Entity::find().order_by_asc(categories::Column::Name);
        let categories = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), category_from_model)
            .await?
            .into_many();
        Ok(categories)
    }

    async fn create(&self, name: &str) -> Result<Category, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let taken = categories::Entity::find().filter(categories::Column::Name.eq(name));
        gateway
            .fetch(FetchRequest::query_one(taken).require_absent())
            .await?;

        let category = gateway
            .persist_projected(
                categories::ActiveModel {
                    name: Set(name.to_owned()),
                    ..Default::default()
                },
                category_from_model,
            )
            .await?;
        Ok(category)
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<Category>, MarketplaceError> {
        if names.is_empty() {
            return Ok(Vec::new());
        }
        let select = categories::Entity::find()
            .filter(categories::Column::Name.is_in(names.iter().cloned()))
            .order_by_asc(categories::Column::Name);
        let categories = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), category_from_model)
            .await?
            .into_many();
        Ok(categories)
    }
}

fn category_from_model(model: categories::Model) -> Category {
    Category {
        id: model.id,
        name: model.name,
    }
}

// ── Course repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCourseRepository {
    pub db: DatabaseConnection,
}

impl DbCourseRepository {
    async fn listing(&self, course: Course) -> Result<CourseListing, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let names = categories::Entity::find()
            .inner_join(course_categories::Entity)
            .filter(course_categories::Column::CourseId.eq(course.id))
            .order_by_asc(categories::Column::Name);
        let categories = gateway
            .fetch_projected(FetchRequest::query_all(names), |c: categories::Model| c.name)
            .await?
            .into_many();
        let students = gateway
            .count(user_courses::Entity::find().filter(user_courses::Column::CourseId.eq(course.id)))
            .await?;
        Ok(CourseListing {
            course,
            categories,
            students,
        })
    }

    async fn listings(&self, courses: Vec<Course>) -> Result<Vec<CourseListing>, MarketplaceError> {
        let mut listings = Vec::with_capacity(courses.len());
        for course in courses {
            listings.push(self.listing(course).await?);
        }
        Ok(listings)
    }

    async fn link_categories(
        &self,
        gateway: &Gateway<'_>,
        course_id: Uuid,
        category_ids: &[Uuid],
    ) -> Result<(), MarketplaceError> {
        for category_id in category_ids {
            gateway
                .persist(course_categories::ActiveModel {
                    course_id: Set(course_id),
                    category_id: Set(*category_id),
                })
                .await?;
        }
        Ok(())
    }
}

impl CourseRepository for DbCourseRepository {
    async fn list(&self, page: Page) -> Result<Vec<CourseListing>, MarketplaceError> {
        let select = courses::Entity::find()
            .order_by_desc(courses::Column::CreatedAt)
            .order_by_desc(courses::Column::Id)
            .offset(page.offset())
            .limit(page.limit());
        let courses = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), course_from_model)
            .await?
            .into_many()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        self.listings(courses).await
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Course>, MarketplaceError> {
        Gateway::new(&self.db)
            .fetch_projected(FetchRequest::<courses::Entity>::by_id(id), course_from_model)
            .await?
            .into_one()
            .transpose()
    }

    async fn find_listing(&self, id: Uuid) -> Result<CourseListing, MarketplaceError> {
        let course = course_from_model(
            load_one(
                &Gateway::new(&self.db),
                FetchRequest::<courses::Entity>::by_id(id),
            )
            .await?,
        )?;
        self.listing(course).await
    }

    async fn create(
        &self,
        course: &NewCourse,
        category_ids: &[Uuid],
    ) -> Result<Course, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let taken = courses::Entity::find()
            .filter(courses::Column::InstructorId.eq(course.instructor_id))
            .filter(courses::Column::Title.eq(course.title.as_str()));
        gateway
            .fetch(FetchRequest::query_one(taken).require_absent())
            .await?;

        let description = course
            .description
            .as_ref()
            .map(encode_json_object)
            .transpose()?;
        let what_you_will_learn = course
            .what_you_will_learn
            .as_deref()
            .map(encode_list)
            .transpose()?;
        let model = gateway
            .persist(courses::ActiveModel {
                title: Set(course.title.clone()),
                headline: Set(course.headline.clone()),
                description: Set(description),
                level: Set(course.level.as_str().to_owned()),
                language: Set(course.language.as_str().to_owned()),
                price_cents: Set(course.price_cents),
                thumbnail: Set(course.thumbnail.clone()),
                requirements: Set(course.requirements.clone()),
                what_you_will_learn: Set(what_you_will_learn),
                rating: Set(None),
                instructor_id: Set(course.instructor_id),
                last_updated: Set(None),
                ..Default::default()
            })
            .await?;
        self.link_categories(&gateway, model.id, category_ids).await?;
        course_from_model(model)
    }

    async fn update(
        &self,
        id: Uuid,
        update: &CourseUpdate,
        category_ids: Option<&[Uuid]>,
    ) -> Result<Course, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<courses::Entity>::by_id(id))
            .await?
            .into_active_model();
        if let Some(ref title) = update.title {
            am.title = Set(title.clone());
        }
        if let Some(ref headline) = update.headline {
            am.headline = Set(Some(headline.clone()));
        }
        if let Some(ref description) = update.description {
            am.description = Set(Some(encode_json_object(description)?));
        }
        if let Some(level) = update.level {
            am.level = Set(level.as_str().to_owned());
        }
        if let Some(language) = update.language {
            am.language = Set(language.as_str().to_owned());
        }
        if let Some(price_cents) = update.price_cents {
            am.price_cents = Set(price_cents);
        }
        if let Some(ref thumbnail) = update.thumbnail {
            am.thumbnail = Set(Some(thumbnail.clone()));
        }
        if let Some(ref requirements) = update.requirements {
            am.requirements = Set(Some(requirements.clone()));
        }
        if let Some(ref items) = update.what_you_will_learn {
            am.what_you_will_learn = Set(Some(encode_list(items)?));
        }
        am.last_updated = Set(Some(Utc::now()));
        let model = gateway.persist(am).await?;

        if let Some(category_ids) = category_ids {
            course_categories::Entity::delete_many()
                .filter(course_categories::Column::CourseId.eq(id))
                .exec(&self.db)
                .await
                .context("clear course categories")?;
            self.link_categories(&gateway, id, category_ids).await?;
        }
        course_from_model(model)
    }

    async fn enroll(&self, user_id: Uuid, course_id: Uuid) -> Result<(), MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        gateway
            .fetch(FetchRequest::<courses::Entity>::by_id(course_id).require_found())
            .await?;
        gateway
            .fetch(FetchRequest::<user_courses::Entity>::by_id((user_id, course_id)).require_absent())
            .await?;
        gateway
            .persist(user_courses::ActiveModel {
                user_id: Set(user_id),
                course_id: Set(course_id),
                ..Default::default()
            })
            .await?;
        Ok(())
    }

    async fn enrolled(&self, user_id: Uuid) -> Result<Vec<CourseListing>, MarketplaceError> {
        let select = courses::Entity::find()
            .inner_join(user_courses::Entity)
            .filter(user_courses::Column::UserId.eq(user_id))
            .order_by_desc(user_courses::Column::EnrolledAt);
        let courses = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), course_from_model)
            .await?
            .into_many()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()?;
        self.listings(courses).await
    }
}

fn course_from_model(model: courses::Model) -> Result<Course, MarketplaceError> {
    Ok(Course {
        id: model.id,
        title: model.title,
        headline: model.headline,
        description: model.description.as_deref().map(decode_json_text),
        level: model.level.parse().context("stored course level")?,
        language: model.language.parse().context("stored course language")?,
        price_cents: model.price_cents,
        thumbnail: model.thumbnail,
        requirements: model.requirements,
        what_you_will_learn: model.what_you_will_learn.as_deref().map(decode_list),
        rating: model.rating,
        instructor_id: model.instructor_id,
        last_updated: model.last_updated,
        created_at: model.created_at,
    })
}

// ── Curriculum repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCurriculumRepository {
    pub db: DatabaseConnection,
}

impl CurriculumRepository for DbCurriculumRepository {
    async fn find_section(&self, id: Uuid) -> Result<Option<Section>, MarketplaceError> {
        let section = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::<sections::Entity>::by_id(id), section_from_model)
            .await?
            .into_one();
        Ok(section)
    }

    async fn section_contents(
        &self,
        course_id: Uuid,
    ) -> Result<Vec<SectionContents>, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let select = sections::Entity::find()
            .filter(sections::Column::CourseId.eq(course_id))
            .order_by_asc(sections::Column::CreatedAt)
            .order_by_asc(sections::Column::Id);
        let sections = gateway
            .fetch_projected(FetchRequest::query_all(select), section_from_model)
            .await?
            .into_many();

        let mut contents = Vec::with_capacity(sections.len());
        for section in sections {
            let lessons = lessons::Entity::find()
                .filter(lessons::Column::SectionId.eq(section.id))
                .order_by_with_nulls(
                    lessons::Column::OrderInSection,
                    Order::Asc,
                    NullOrdering::First,
                )
                .order_by_asc(lessons::Column::Id);
            let quizzes = quizzes::Entity::find()
                .filter(quizzes::Column::SectionId.eq(section.id))
                .order_by_with_nulls(
                    quizzes::Column::OrderInSection,
                    Order::Asc,
                    NullOrdering::First,
                )
                .order_by_asc(quizzes::Column::Id);
            let lessons = gateway
                .fetch_projected(FetchRequest::query_all(lessons), lesson_from_model)
                .await?
                .into_many();
            let quizzes = gateway
                .fetch_projected(FetchRequest::query_all(quizzes), quiz_from_model)
                .await?
                .into_many();
            contents.push(SectionContents {
                section,
                lessons,
                quizzes,
            });
        }
        Ok(contents)
    }

    async fn create_section(
        &self,
        course_id: Uuid,
        title: &str,
    ) -> Result<Section, MarketplaceError> {
        let section = Gateway::new(&self.db)
            .persist_projected(
                sections::ActiveModel {
                    course_id: Set(course_id),
                    section_title: Set(title.to_owned()),
                    duration: Set(None),
                    lessons: Set(None),
                    ..Default::default()
                },
                section_from_model,
            )
            .await?;
        Ok(section)
    }

    async fn rename_section(&self, id: Uuid, title: &str) -> Result<Section, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<sections::Entity>::by_id(id))
            .await?
            .into_active_model();
        am.section_title = Set(title.to_owned());
        Ok(gateway.persist_projected(am, section_from_model).await?)
    }

    async fn save_section_totals(&self, section: &Section) -> Result<Section, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<sections::Entity>::by_id(section.id))
            .await?
            .into_active_model();
        am.duration = Set(section.duration);
        am.lessons = Set(section.lessons);
        Ok(gateway.persist_projected(am, section_from_model).await?)
    }

    async fn find_lesson(&self, id: Uuid) -> Result<Option<Lesson>, MarketplaceError> {
        let lesson = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::<lessons::Entity>::by_id(id), lesson_from_model)
            .await?
            .into_one();
        Ok(lesson)
    }

    async fn create_lesson(
        &self,
        section_id: Uuid,
        lesson: &NewLesson,
    ) -> Result<Lesson, MarketplaceError> {
        let lesson = Gateway::new(&self.db)
            .persist_projected(
                lessons::ActiveModel {
                    section_id: Set(section_id),
                    title: Set(lesson.title.clone()),
                    duration: Set(None),
                    free_preview: Set(lesson.free_preview),
                    link: Set(None),
                    order_in_section: Set(lesson.order_in_section.map(order_to_column).transpose()?),
                    ..Default::default()
                },
                lesson_from_model,
            )
            .await?;
        Ok(lesson)
    }

    async fn update_lesson(
        &self,
        id: Uuid,
        update: &LessonUpdate,
    ) -> Result<Lesson, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<lessons::Entity>::by_id(id))
            .await?
            .into_active_model();
        if let Some(ref title) = update.title {
            am.title = Set(title.clone());
        }
        if let Some(free_preview) = update.free_preview {
            am.free_preview = Set(free_preview);
        }
        if let Some(order) = update.order_in_section {
            am.order_in_section = Set(order.map(order_to_column).transpose()?);
        }
        Ok(gateway.persist_projected(am, lesson_from_model).await?)
    }

    async fn set_lesson_video(
        &self,
        id: Uuid,
        link: &str,
        duration_seconds: i32,
    ) -> Result<Lesson, MarketplaceError> {
        let gateway = Gateway::new(&self.db);
        let mut am = load_one(&gateway, FetchRequest::<lessons::Entity>::by_id(id))
            .await?
            .into_active_model();
        am.link = Set(Some(link.to_owned()));
        am.duration = Set(Some(duration_seconds));
        Ok(gateway.persist_projected(am, lesson_from_model).await?)
    }

    async fn create_resource(
        &self,
        lesson_id: Uuid,
        name: &str,
        link: &str,
    ) -> Result<LessonResource, MarketplaceError> {
        let resource = Gateway::new(&self.db)
            .persist_projected(
                lesson_resources::ActiveModel {
                    lesson_id: Set(lesson_id),
                    name: Set(name.to_owned()),
                    link: Set(link.to_owned()),
                    ..Default::default()
                },
                resource_from_model,
            )
            .await?;
        Ok(resource)
    }

    async fn list_resources(
        &self,
        lesson_id: Uuid,
    ) -> Result<Vec<LessonResource>, MarketplaceError> {
        let select = lesson_resources::Entity::find()
            .filter(lesson_resources::Column::LessonId.eq(lesson_id))
            .order_by_asc(lesson_resources::Column::Id);
        let resources = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), resource_from_model)
            .await?
            .into_many();
        Ok(resources)
    }

    async fn find_quiz(&self, id: Uuid) -> Result<Option<Quiz>, MarketplaceError> {
        let quiz = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::<quizzes::Entity>::by_id(id), quiz_from_model)
            .await?
            .into_one();
        Ok(quiz)
    }

    async fn create_quiz(
        &self,
        section_id: Uuid,
        title: &str,
        order_in_section: Option<u32>,
    ) -> Result<Quiz, MarketplaceError> {
        let quiz = Gateway::new(&self.db)
            .persist_projected(
                quizzes::ActiveModel {
                    section_id: Set(section_id),
                    title: Set(title.to_owned()),
                    order_in_section: Set(order_in_section.map(order_to_column).transpose()?),
                    ..Default::default()
                },
                quiz_from_model,
            )
            .await?;
        Ok(quiz)
    }

    async fn add_question(
        &self,
        quiz_id: Uuid,
        question: &str,
        options: &[String],
        answer: u32,
    ) -> Result<QuizQuestion, MarketplaceError> {
        let options = encode_list(options)?;
        let answer = i32::try_from(answer)
            .map_err(|_| MarketplaceError::InvalidInput("answer index out of range".into()))?;
        let question = Gateway::new(&self.db)
            .persist_projected(
                quiz_questions::ActiveModel {
                    quiz_id: Set(quiz_id),
                    question: Set(question.to_owned()),
                    options: Set(options),
                    answer: Set(answer),
                    ..Default::default()
                },
                question_from_model,
            )
            .await?;
        Ok(question)
    }

    async fn list_questions(&self, quiz_id: Uuid) -> Result<Vec<QuizQuestion>, MarketplaceError> {
        let select = quiz_questions::Entity::find()
            .filter(quiz_questions::Column::QuizId.eq(quiz_id))
            .order_by_asc(quiz_questions::Column::Id);
        let questions = Gateway::new(&self.db)
            .fetch_projected(FetchRequest::query_all(select), question_from_model)
            .await?
            .into_many();
        Ok(questions)
    }
}

fn section_from_model(model: sections::Model) -> Section {
    Section {
        id: model.id,
        course_id: model.course_id,
        section_title: model.section_title,
        duration: model.duration,
        lessons: model.lessons,
        created_at: model.created_at,
    }
}

fn lesson_from_model(model: lessons::Model) -> Lesson {
    Lesson {
        id: model.id,
        section_id: model.section_id,
        title: model.title,
        duration: model.duration,
        free_preview: model.free_preview,
        link: model.link,
        order_in_section: model.order_in_section.and_then(order_from_column),
    }
}

fn resource_from_model(model: lesson_resources::Model) -> LessonResource {
    LessonResource {
        id: model.id,
        lesson_id: model.lesson_id,
        name: model.name,
        link: model.link,
    }
}

fn quiz_from_model(model: quizzes::Model) -> Quiz {
    Quiz {
        id: model.id,
        section_id: model.section_id,
        title: model.title,
        order_in_section: model.order_in_section.and_then(order_from_column),
    }
}

fn question_from_model(model: quiz_questions::Model) -> QuizQuestion {
    QuizQuestion {
        id: model.id,
        quiz_id: model.quiz_id,
        question: model.question,
        options: decode_list(&model.options),
        answer: u32::try_from(model.answer).unwrap_or_default(),
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

/// Fetch exactly one raw model, failing with `NotFound` when absent.
async fn load_one<E>(
    gateway: &Gateway<'_>,
    request: FetchRequest<E>,
) -> Result<E::Model, MarketplaceError>
where
    E: ucademic_core::gateway::Record,
{
    gateway
        .fetch(request.require_found())
        .await?
        .into_one()
        .ok_or_else(|| anyhow::anyhow!("presence check passed without a record").into())
}

/// The column is a signed integer; keys past `i32::MAX` cannot be stored.
fn order_to_column(order: u32) -> Result<i32, MarketplaceError> {
    i32::try_from(order).map_err(|_| {
        MarketplaceError::InvalidInput(format!(
            "orderInSection must be at most {}",
            i32::MAX
        ))
    })
}

fn order_from_column(order: i32) -> Option<u32> {
    u32::try_from(order).ok()
}
