//! Field-level input checks shared by the request forms.
//!
//! Every check returns a [`ValidationError`] whose message is safe to show to
//! the end user as-is.

use chrono::NaiveDateTime;
use regex::Regex;
use rust_decimal::Decimal;
use std::sync::OnceLock;
use thiserror::Error;

use crate::money;

/// Wire format of an event date, as produced by an HTML `datetime-local` input.
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub String);

impl ValidationError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_re() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
    })
}

/// Trims `value` and rejects it when empty.
pub fn required<'a>(field: &str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Required text whose length (in characters) lies in `min..=max`.
pub fn length(field: &str, value: &str, min: usize, max: usize) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    let len = value.chars().count();
    if len < min || len > max {
        return Err(ValidationError(format!(
            "{field} must be between {min} and {max} characters"
        )));
    }
    Ok(value.to_owned())
}

/// Optional text. Blank input is treated as absent.
pub fn optional_max(
    field: &str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max => Err(ValidationError(format!(
            "{field} cannot exceed {max} characters"
        ))),
        Some(v) => Ok(Some(v.to_owned())),
    }
}

pub fn email(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = required(field, value)?;
    if !email_re().is_match(value) {
        return Err(ValidationError(format!("{field} must be a valid email address")));
    }
    Ok(value.to_owned())
}

pub fn optional_email(field: &str, value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => email(field, v).map(Some),
    }
}

/// Phone numbers are optional; when present they must be 10 to 15 characters.
pub fn phone(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) => {
            let len = v.chars().count();
            if !(10..=15).contains(&len) {
                return Err(ValidationError::new(
                    "Phone must be between 10 and 15 characters",
                ));
            }
            Ok(Some(v.to_owned()))
        }
    }
}

pub fn password(password: &str, confirmation: &str) -> Result<(), ValidationError> {
    if password.is_empty() {
        return Err(ValidationError::new("Password is required"));
    }
    if password.chars().count() < 6 {
        return Err(ValidationError::new(
            "Password must be at least 6 characters",
        ));
    }
    if password != confirmation {
        return Err(ValidationError::new("Passwords must match"));
    }
    Ok(())
}

pub fn optional_range(
    field: &str,
    value: Option<i32>,
    min: i32,
    max: i32,
) -> Result<Option<i32>, ValidationError> {
    match value {
        Some(v) if v < min || v > max => Err(ValidationError(format!(
            "{field} must be between {min} and {max}"
        ))),
        other => Ok(other),
    }
}

/// Amount ≥ 0, returned in cents.
pub fn non_negative_amount(field: &str, amount: Decimal) -> Result<i64, ValidationError> {
    let cents = money::to_cents(amount)
        .ok_or_else(|| ValidationError(format!("{field} is too large")))?;
    if cents < 0 {
        return Err(ValidationError(format!("{field} must be a positive number")));
    }
    Ok(cents)
}

/// Amount > 0 after rounding to cents, returned in cents.
pub fn positive_amount(field: &str, amount: Decimal) -> Result<i64, ValidationError> {
    let cents = money::to_cents(amount)
        .ok_or_else(|| ValidationError(format!("{field} is too large")))?;
    if cents <= 0 {
        return Err(ValidationError(format!("{field} must be greater than zero")));
    }
    Ok(cents)
}

/// Vendor rating in `[0, 5]`, returned in hundredths of a point.
pub fn rating(value: Option<Decimal>) -> Result<Option<i32>, ValidationError> {
    let Some(value) = value else {
        return Ok(None);
    };
    if value < Decimal::ZERO || value > Decimal::from(5) {
        return Err(ValidationError::new("Rating must be between 0 and 5"));
    }
    let hundredths = money::to_cents(value).unwrap_or_default();
    Ok(Some(hundredths as i32))
}

pub fn event_date(value: &str) -> Result<NaiveDateTime, ValidationError> {
    let value = required("Event date", value)?;
    NaiveDateTime::parse_from_str(value, EVENT_DATE_FORMAT)
        .map_err(|_| ValidationError::new("Invalid date format, expected YYYY-MM-DDTHH:MM"))
}
