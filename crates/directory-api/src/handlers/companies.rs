// ============================================================================
// Directory API - Company Handlers
// File: crates/directory-api/src/handlers/companies.rs
// ============================================================================
//! Company directory endpoints under `/api/companies`

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use directory_core::domain::{Company, CompanyFilter, CompanyPatch, NewCompany};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, AuthUser, SuperAdmin};
use crate::response::ApiResponse;
use crate::state::AppState;

/// `?is_active=true&is_verified=false&search=salon`
#[derive(Debug, Default, Deserialize)]
pub struct ListCompaniesQuery {
    pub is_active: Option<bool>,
    pub is_verified: Option<bool>,
    pub search: Option<String>,
}

impl From<ListCompaniesQuery> for CompanyFilter {
    fn from(query: ListCompaniesQuery) -> Self {
        CompanyFilter {
            is_active: query.is_active,
            is_verified: query.is_verified,
            search: query.search,
        }
    }
}

/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    SuperAdmin(admin): SuperAdmin,
    ApiJson(input): ApiJson<NewCompany>,
) -> Result<(StatusCode, Json<ApiResponse<Company>>), ApiError> {
    let company = state.companies.create(input, admin.user_id).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(company).with_message("Company created")),
    ))
}

/// GET /api/companies
pub async fn list_companies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListCompaniesQuery>,
) -> Result<Json<ApiResponse<Vec<Company>>>, ApiError> {
    let companies = state.companies.list(&query.into()).await?;
    Ok(Json(ApiResponse::list(companies)))
}

/// GET /api/companies/{id}
pub async fn get_company(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let company = state.companies.get(id).await?;
    Ok(Json(ApiResponse::success(company)))
}

/// PUT /api/companies/{id}
pub async fn update_company(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    ApiPath(id): ApiPath<i32>,
    ApiJson(patch): ApiJson<CompanyPatch>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let company = state.companies.update(id, patch).await?;
    Ok(Json(ApiResponse::success(company).with_message("Company updated")))
}

/// DELETE /api/companies/{id}
pub async fn delete_company(
    State(state): State<AppState>,
    SuperAdmin(_admin): SuperAdmin,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !state.companies.soft_delete(id).await? {
        return Err(ApiError::NotFound(format!("Company not found: {}", id)));
    }
    Ok(Json(ApiResponse::message("Company deleted")))
}

/// POST /api/companies/{id}/verify
pub async fn verify_company(
    State(state): State<AppState>,
    SuperAdmin(_admin): SuperAdmin,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Company>>, ApiError> {
    let company = state.companies.verify(id).await?;
    Ok(Json(ApiResponse::success(company).with_message("Company verified")))
}
