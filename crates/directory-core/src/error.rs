//! Domain errors

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// A single rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation failed on {} field(s)", .0.len())]
    ValidationError(Vec<FieldViolation>),

    #[error("Company not found: {0}")]
    CompanyNotFound(i32),

    #[error("Employee {employee_id} not found in company {company_id}")]
    EmployeeNotFound { company_id: i32, employee_id: i32 },

    #[error("User not found: {0}")]
    UserNotFound(i32),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Address service unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already exists: {0}")]
    EmailAlreadyExists(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DomainError::ValidationError(vec![FieldViolation::new(field, message)])
    }

    /// Violations carried by a `ValidationError`, empty for every other variant.
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            DomainError::ValidationError(violations) => violations,
            _ => &[],
        }
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        let mut violations: Vec<FieldViolation> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                let field = field.to_string();
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldViolation::new(field.clone(), message)
                })
            })
            .collect();

        // field_errors() is a HashMap; keep the reported order stable
        violations.sort_by(|a, b| a.field.cmp(&b.field));
        DomainError::ValidationError(violations)
    }
}
