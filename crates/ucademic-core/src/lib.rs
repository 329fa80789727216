//! Shared infrastructure for Ucademic services.
//!
//! The [`gateway`] module is the single data-access path used by every
//! repository; the rest is ambient plumbing (config, tracing, middleware).

pub mod config;
pub mod error;
pub mod gateway;
pub mod health;
pub mod middleware;
pub mod serde;
pub mod tracing;
