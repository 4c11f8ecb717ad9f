//! Request extractors: bearer authentication, role gating, and JSON/path/query
//! extraction that fails with the standard error envelope.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Query},
    http::{header::AUTHORIZATION, request::Parts},
    Json,
};

use directory_core::{Principal, UserRole};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Any authenticated caller.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Principal);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing bearer token".to_string()))?;

        let token = header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Malformed authorization header".to_string()))?;

        let principal = state.auth.authenticate(token)?;
        Ok(AuthUser(principal))
    }
}

/// Authenticated caller holding the `super_admin` role.
#[derive(Debug, Clone)]
pub struct SuperAdmin(pub Principal);

impl FromRequestParts<AppState> for SuperAdmin {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let AuthUser(principal) = AuthUser::from_request_parts(parts, state).await?;
        principal.require_role(&[UserRole::SuperAdmin])?;
        Ok(SuperAdmin(principal))
    }
}
