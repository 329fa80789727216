//! Course domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const MAX_TITLE_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl CourseLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl FromStr for CourseLevel {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(CourseError::UnknownLevel(s.to_owned())),
        }
    }
}

impl fmt::Display for CourseLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Teaching language (ISO 639-1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseLanguage {
    Vi,
    En,
}

impl CourseLanguage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vi => "vi",
            Self::En => "en",
        }
    }
}

impl FromStr for CourseLanguage {
    type Err = CourseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "vi" => Ok(Self::Vi),
            "en" => Ok(Self::En),
            _ => Err(CourseError::UnknownLanguage(s.to_owned())),
        }
    }
}

impl fmt::Display for CourseLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseError {
    #[error("unknown course level: {0}")]
    UnknownLevel(String),
    #[error("unknown course language: {0}")]
    UnknownLanguage(String),
    #[error("title must be 1 to {MAX_TITLE_LEN} characters")]
    InvalidTitle,
    #[error("price must be a non-negative amount within range")]
    InvalidPrice,
}

pub fn validate_title(title: &str) -> Result<(), CourseError> {
    let len = title.trim().chars().count();
    if len == 0 || title.chars().count() > MAX_TITLE_LEN {
        return Err(CourseError::InvalidTitle);
    }
    Ok(())
}

/// Convert a client-supplied price to cents, rounding to the nearest cent.
/// Amounts whose cent value does not fit in `i64` are rejected.
pub fn price_to_cents(price: f64) -> Result<i64, CourseError> {
    if !price.is_finite() || price < 0.0 {
        return Err(CourseError::InvalidPrice);
    }
    let cents = (price * 100.0).round();
    // `i64::MAX as f64` rounds up to 2^63, which is already out of range.
    if cents >= i64::MAX as f64 {
        return Err(CourseError::InvalidPrice);
    }
    Ok(cents as i64)
}

pub fn cents_to_price(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Render a duration in seconds as `"{h}h {m}m {s}s"`.
///
/// Each unit is shown only when the remaining seconds strictly exceed it, so
/// exactly 3600 renders as `"60m"` and exactly 60 as `"60s"`. Zero renders
/// as the empty string.
pub fn format_duration(seconds: i64) -> String {
    let mut rest = seconds;
    let mut out = String::new();
    if rest > 3600 {
        out.push_str(&format!("{}h ", rest / 3600));
        rest %= 3600;
    }
    if rest > 60 {
        out.push_str(&format!("{}m ", rest / 60));
        rest %= 60;
    }
    if rest > 0 {
        out.push_str(&format!("{rest}s"));
    }
    out.truncate(out.trim_end().len());
    out
}
