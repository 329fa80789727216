//! Course-marketplace domain rules: enums, validators, column codecs and
//! the section content merge. No framework or storage dependencies.

pub mod codec;
pub mod course;
pub mod pagination;
pub mod section_content;
pub mod user;
