use sea_orm_migration::prelude::*;

mod m20260301_000001_create_users;
mod m20260301_000002_create_categories;
mod m20260301_000003_create_courses;
mod m20260301_000004_create_course_categories;
mod m20260301_000005_create_user_courses;
mod m20260301_000006_create_sections;
mod m20260301_000007_create_lessons;
mod m20260301_000008_create_lesson_resources;
mod m20260301_000009_create_quizzes;
mod m20260301_000010_create_quiz_questions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260301_000001_create_users::Migration),
            Box::new(m20260301_000002_create_categories::Migration),
            Box::new(m20260301_000003_create_courses::Migration),
            Box::new(m20260301_000004_create_course_categories::Migration),
            Box::new(m20260301_000005_create_user_courses::Migration),
            Box::new(m20260301_000006_create_sections::Migration),
            Box::new(m20260301_000007_create_lessons::Migration),
            Box::new(m20260301_000008_create_lesson_resources::Migration),
            Box::new(m20260301_000009_create_quizzes::Migration),
            Box::new(m20260301_000010_create_quiz_questions::Migration),
        ]
    }
}
