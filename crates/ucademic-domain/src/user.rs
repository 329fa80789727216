//! User domain types and profile validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 8;
pub const PHONE_DIGITS: std::ops::RangeInclusive<usize> = 10..=15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
        }
    }

    pub fn from_stored(value: &str) -> Option<Self> {
        match value {
            "Male" => Some(Self::Male),
            "Female" => Some(Self::Female),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProfileError {
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("password must be at least {MIN_PASSWORD_LEN} characters")]
    PasswordTooShort,
    #[error("phone number must be between 10 and 15 digits")]
    InvalidPhoneNumber,
    #[error("date of birth must be in the past")]
    DateOfBirthNotInPast,
}

/// Minimal shape check: one `@` with a non-empty local part and a dotted domain.
pub fn validate_email(email: &str) -> Result<(), ProfileError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ProfileError::InvalidEmail);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || domain.contains('@') || !domain_ok || email.contains(char::is_whitespace) {
        return Err(ProfileError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), ProfileError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ProfileError::PasswordTooShort);
    }
    Ok(())
}

pub fn validate_phone_number(phone: &str) -> Result<(), ProfileError> {
    if !PHONE_DIGITS.contains(&phone.len()) || !phone.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ProfileError::InvalidPhoneNumber);
    }
    Ok(())
}

/// `today` is passed in so callers decide the clock.
pub fn validate_date_of_birth(date: NaiveDate, today: NaiveDate) -> Result<(), ProfileError> {
    if date > today {
        return Err(ProfileError::DateOfBirthNotInPast);
    }
    Ok(())
}
