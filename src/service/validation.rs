//! Credential validation for signup and login payloads.

use crate::error::AppError;
use regex::Regex;
use std::sync::OnceLock;

pub const MIN_PASSWORD_LENGTH: usize = 8;

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("static email pattern"))
}

pub struct CredentialsValidator;

impl CredentialsValidator {
    /// Both fields present and non-blank.
    pub fn require(email: &str, password: &str) -> Result<(), AppError> {
        if email.trim().is_empty() {
            return Err(AppError::BadRequest("email is required".into()));
        }
        if password.is_empty() {
            return Err(AppError::BadRequest("password is required".into()));
        }
        Ok(())
    }

    /// `require` plus address shape and password length.
    pub fn validate_signup(email: &str, password: &str) -> Result<(), AppError> {
        Self::require(email, password)?;
        if !email_pattern().is_match(email.trim()) {
            return Err(AppError::BadRequest("email must be a valid email address".into()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::BadRequest(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        Ok(())
    }
}

/// Emails are stored and looked up trimmed and lower-cased.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
