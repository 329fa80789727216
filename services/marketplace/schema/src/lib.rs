//! sea-orm entities for the marketplace database.
//!
//! Every entity implements [`ucademic_core::gateway::Record`] so repositories
//! can fetch and persist it through the gateway. Entities keyed by a single
//! `id` generate a UUIDv7 on insert when none was set.

pub mod categories;
pub mod course_categories;
pub mod courses;
pub mod lesson_resources;
pub mod lessons;
pub mod quiz_questions;
pub mod quizzes;
pub mod sections;
pub mod user_courses;
pub mod users;
