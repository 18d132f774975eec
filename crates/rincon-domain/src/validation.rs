//! Client-side field validation: Chilean RUT, email, passwords, birth dates
//! and generic length checks.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use thiserror::Error;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;

/// Minimum customer age at registration.
pub const ADULT_AGE: i32 = 18;

static RUT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{7,8}-[0-9kK]$").expect("valid RUT regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    Blank { field: &'static str },
    #[error("{field} exceeds {max} characters")]
    TooLong { field: &'static str, max: usize },
    #[error("{field} must not be negative")]
    Negative { field: &'static str },
    #[error("quantity must be at least 1")]
    NonPositiveQuantity,
    #[error("invalid RUT")]
    InvalidRut,
    #[error("invalid email")]
    InvalidEmail,
    #[error("password must have at least {PASSWORD_MIN_LEN} characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("invalid birth date")]
    InvalidBirthDate,
    #[error("customer must be at least {ADULT_AGE} years old")]
    Underage,
}

pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    Ok(())
}

pub fn require_max_len(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// `None` for missing or whitespace-only input, the trimmed text otherwise.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Modulo-11 check digit of a RUT body.
///
/// Digits are weighted 2..=7 from the rightmost, cycling. A result of 11 maps
/// to `'0'` and 10 maps to `'K'`.
pub fn rut_check_digit(body: u32) -> char {
    let mut sum = 0u32;
    let mut weight = 2u32;
    let mut rest = body;
    while rest > 0 {
        sum += (rest % 10) * weight;
        rest /= 10;
        weight = if weight == 7 { 2 } else { weight + 1 };
    }
    match 11 - sum % 11 {
        11 => '0',
        10 => 'K',
        d => char::from_digit(d, 10).unwrap_or('0'),
    }
}

/// `true` when `rut` looks like `12345678-5` and its check digit matches.
pub fn validate_rut(rut: &str) -> bool {
    if !RUT_RE.is_match(rut) {
        return false;
    }
    let Some((body, dv)) = rut.split_once('-') else {
        return false;
    };
    let Ok(body) = body.parse::<u32>() else {
        return false;
    };
    dv.eq_ignore_ascii_case(&rut_check_digit(body).to_string())
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn validate_password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    if password != confirmation {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// Whole years elapsed between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut years = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        years -= 1;
    }
    years
}

/// Parse an ISO `YYYY-MM-DD` birth date and require an adult customer.
pub fn validate_birth_date(raw: &str, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    let birth = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidBirthDate)?;
    if age_on(birth, today) < ADULT_AGE {
        return Err(ValidationError::Underage);
    }
    Ok(birth)
}
