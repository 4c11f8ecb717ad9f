// ============================================================================
// Directory API - Auth Handlers
// File: crates/directory-api/src/handlers/auth.rs
// ============================================================================
//! Account endpoints (register, login, me)

use axum::{extract::State, http::StatusCode, Json};

use directory_core::domain::{LoginInput, RegisterInput, User};
use directory_core::services::AuthSession;

use crate::error::ApiError;
use crate::extract::{ApiJson, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

/// Register handler - POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<RegisterInput>,
) -> Result<(StatusCode, Json<ApiResponse<AuthSession>>), ApiError> {
    let session = state.accounts.register(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(session).with_message("Registration successful")),
    ))
}

/// Login handler - POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<LoginInput>,
) -> Result<Json<ApiResponse<AuthSession>>, ApiError> {
    let session = state.accounts.login(input).await?;
    Ok(Json(ApiResponse::success(session).with_message("Login successful")))
}

/// Current user - GET /api/auth/me
pub async fn me(
    State(state): State<AppState>,
    AuthUser(principal): AuthUser,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    let user = state.accounts.me(&principal).await?;
    Ok(Json(ApiResponse::success(user)))
}
