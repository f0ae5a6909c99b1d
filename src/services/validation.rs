//! Input rules for registration, login and reminder bodies.
//!
//! Each validator collects every violated rule so the client can show a
//! message next to each field.

use crate::error::FieldError;
use crate::models::reminder::ReminderRequest;
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

pub const MIN_PASSWORD_LENGTH: usize = 6;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

pub fn validate_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn validate_registration(name: &str, email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(FieldError::new("name", "Name is required"));
    }

    if !validate_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(FieldError::new(
            "password",
            format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            ),
        ));
    }

    errors
}

pub fn validate_login(email: &str, password: &str) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if !validate_email(email) {
        errors.push(FieldError::new("email", "Invalid email format"));
    }

    if password.is_empty() {
        errors.push(FieldError::new("password", "Password is required"));
    }

    errors
}

/// Accepts RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_entry_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// A reminder body that passed field validation. Company existence and
/// the effective day count are checked later, against the catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderInput {
    pub company_id: String,
    pub company_user_id: String,
    pub last_entry_date: DateTime<Utc>,
    pub custom_days: Option<i64>,
}

pub fn validate_reminder(request: &ReminderRequest) -> Result<ReminderInput, Vec<FieldError>> {
    let mut errors = Vec::new();

    let company_id = request.company_id.trim();
    if company_id.is_empty() {
        errors.push(FieldError::new("company_id", "Company is required"));
    }

    let company_user_id = request.company_user_id.trim();
    if company_user_id.is_empty() {
        errors.push(FieldError::new(
            "company_user_id",
            "Account identifier is required",
        ));
    }

    let last_entry_date = if request.last_entry_date.trim().is_empty() {
        errors.push(FieldError::new(
            "last_entry_date",
            "Last entry date is required",
        ));
        None
    } else {
        let parsed = parse_entry_date(&request.last_entry_date);
        if parsed.is_none() {
            errors.push(FieldError::new(
                "last_entry_date",
                "Last entry date must be a date (YYYY-MM-DD) or RFC 3339 timestamp",
            ));
        }
        parsed
    };

    if let Some(days) = request.custom_days {
        if days < 1 {
            errors.push(FieldError::new(
                "custom_days",
                "Custom days must be at least 1",
            ));
        }
    }

    match last_entry_date {
        Some(last_entry_date) if errors.is_empty() => Ok(ReminderInput {
            company_id: company_id.to_string(),
            company_user_id: company_user_id.to_string(),
            last_entry_date,
            custom_days: request.custom_days,
        }),
        _ => Err(errors),
    }
}
