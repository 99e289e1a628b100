use lazy_static::lazy_static;
use regex::Regex;

use super::dto::RegisterRequest;
use crate::error::FieldError;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const PASSWORD_SYMBOLS: &str = "#?!@$%^&*-";

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

pub fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Returns one message per unmet rule.
pub fn password_violations(password: &str) -> Vec<String> {
    let mut out = Vec::new();
    if password.chars().count() < MIN_PASSWORD_LEN {
        out.push(format!(
            "must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        out.push("must contain an uppercase letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        out.push("must contain a lowercase letter".into());
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        out.push("must contain a digit".into());
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        out.push(format!("must contain one of {}", PASSWORD_SYMBOLS));
    }
    out
}

impl RegisterRequest {
    /// Trims and lowercases the email, trims the name.
    pub fn normalize(&mut self) {
        self.email = normalize_email(&self.email);
        self.name = self.name.trim().to_string();
    }

    /// Collects every field error instead of stopping at the first.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();

        if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "must be a valid email address"));
        }
        for msg in password_violations(&self.password) {
            errors.push(FieldError::new("password", msg));
        }
        if self.name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }
        if let Some(age) = self.profile.age {
            if !(0..=150).contains(&age) {
                errors.push(FieldError::new("age", "must be between 0 and 150"));
            }
        }
        if let Some(country) = &self.profile.country {
            if country.trim().is_empty() {
                errors.push(FieldError::new("country", "must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
