pub mod auth;
pub mod category;
pub mod course;
pub mod curriculum;
pub mod health;
pub mod user;
