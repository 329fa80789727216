mod helpers;

mod auth_test;
mod course_test;
mod curriculum_test;
mod health_test;
mod repository_test;
mod user_test;
