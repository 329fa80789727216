//! Auth types shared across Ucademic services.
//!
//! Provides bearer JWT issuing/validation and the `BearerIdentity` extractor.

pub mod identity;
pub mod token;
