//! Test utilities for Ucademic services.
//!
//! Provides `MockAuth` bearer headers and an in-memory SQLite database.
//! Import in `#[cfg(test)]` blocks and `tests/` only; never in production code.

pub mod auth;
pub mod db;
