//! Field-level validation shared by the create and partial-update paths.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidateUrl, ValidationError, ValidationErrors};

static IBAN_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^TR\d{24}$").unwrap());

pub const IBAN_MESSAGE: &str = "IBAN must start with TR followed by 24 digits (26 characters)";
pub const EMAIL_MESSAGE: &str = "Enter a valid email address";
pub const URL_MESSAGE: &str = "Enter a valid website URL";
pub const NAME_MESSAGE: &str = "Company name must be at least 2 characters";
pub const LATITUDE_MESSAGE: &str = "Latitude must be between -90 and 90";
pub const LONGITUDE_MESSAGE: &str = "Longitude must be between -180 and 180";
pub const COMMISSION_MESSAGE: &str = "Commission rate must be between 0 and 100";

/// Strips everything but ASCII letters and digits and upper-cases the rest.
///
/// `"TR00 0000 0000 0000 0000 0000 00"` becomes `"TR000000000000000000000000"`.
pub fn normalize_iban(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

pub fn is_valid_iban(iban: &str) -> bool {
    IBAN_PATTERN.is_match(iban)
}

/// Expects an already normalized value.
pub fn validate_iban(iban: &str) -> Result<(), ValidationError> {
    if is_valid_iban(iban) {
        Ok(())
    } else {
        Err(error_with_message(
            "iban",
            format!("{} (normalized length: {})", IBAN_MESSAGE, iban.len()),
        ))
    }
}

pub(crate) fn error_with_message(
    code: &'static str,
    message: impl Into<Cow<'static, str>>,
) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

/// Collects violations for hand-written `Validate` impls.
#[derive(Default)]
pub(crate) struct Checks {
    errors: ValidationErrors,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, field: &'static str, code: &'static str, message: impl Into<Cow<'static, str>>) {
        self.errors.add(field, error_with_message(code, message));
    }

    pub fn min_chars(&mut self, field: &'static str, value: &str, min: usize, message: &'static str) {
        if value.chars().count() < min {
            self.fail(field, "length", message);
        }
    }

    pub fn email(&mut self, field: &'static str, value: &str) {
        if !value.validate_email() {
            self.fail(field, "email", EMAIL_MESSAGE);
        }
    }

    pub fn url(&mut self, field: &'static str, value: &str) {
        if !value.validate_url() {
            self.fail(field, "url", URL_MESSAGE);
        }
    }

    pub fn range(&mut self, field: &'static str, value: f64, min: f64, max: f64, message: &'static str) {
        if !(min..=max).contains(&value) {
            self.fail(field, "range", message);
        }
    }

    pub fn iban(&mut self, field: &'static str, value: &str) {
        if let Err(error) = validate_iban(value) {
            self.errors.add(field, error);
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}
