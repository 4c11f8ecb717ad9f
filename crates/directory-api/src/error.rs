//! HTTP error mapping

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use directory_core::{DomainError, FieldViolation};

use crate::response::ApiResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(violations) => ApiError::Validation(violations),
            DomainError::CompanyNotFound(_)
            | DomainError::EmployeeNotFound { .. }
            | DomainError::UserNotFound(_) => ApiError::NotFound(err.to_string()),
            DomainError::InvalidInput(msg) => ApiError::BadRequest(msg),
            DomainError::EmailAlreadyExists(_) => ApiError::BadRequest(err.to_string()),
            DomainError::UpstreamUnavailable(msg) => ApiError::ServiceUnavailable(msg),
            DomainError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            DomainError::InvalidCredentials => ApiError::Unauthorized(err.to_string()),
            DomainError::Forbidden(msg) => ApiError::Forbidden(msg),
            DomainError::DatabaseError(msg) => ApiError::DatabaseError(msg),
            DomainError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(violations) => {
                tracing::warn!("Validation failed on {} field(s)", violations.len());
                (
                    StatusCode::BAD_REQUEST,
                    ApiResponse::error("Validation failed", Some(violations)),
                )
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, ApiResponse::error(msg, None))
            }
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, ApiResponse::error(msg, None))
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, ApiResponse::error(msg, None))
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, ApiResponse::error(msg, None))
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Upstream unavailable: {}", msg);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ApiResponse::error("Address service unavailable", None),
                )
            }
            // Internal details stay in the log
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error", None),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::error("Internal server error", None),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_status_mapping() {
        let cases = [
            (DomainError::validation("name", "short"), StatusCode::BAD_REQUEST),
            (DomainError::CompanyNotFound(1), StatusCode::NOT_FOUND),
            (DomainError::InvalidInput("user_id".into()), StatusCode::BAD_REQUEST),
            (DomainError::UpstreamUnavailable("timeout".into()), StatusCode::SERVICE_UNAVAILABLE),
            (DomainError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("role".into()), StatusCode::FORBIDDEN),
            (DomainError::EmailAlreadyExists("a@b.co".into()), StatusCode::BAD_REQUEST),
            (DomainError::DatabaseError("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
