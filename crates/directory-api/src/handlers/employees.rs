// ============================================================================
// Directory API - Employee Handlers
// File: crates/directory-api/src/handlers/employees.rs
// ============================================================================
//! Workforce endpoints under `/api/companies/{id}/employees`

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use directory_core::domain::{Employee, EmployeeRole};

use crate::error::ApiError;
use crate::extract::{ApiJson, ApiPath, AuthUser};
use crate::response::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AddEmployeeRequest {
    pub user_id: i32,
    pub role: Option<EmployeeRole>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRoleRequest {
    pub role: EmployeeRole,
}

/// GET /api/companies/{id}/employees
pub async fn list_employees(
    State(state): State<AppState>,
    ApiPath(company_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<Employee>>>, ApiError> {
    let employees = state.workforce.list_employees(company_id).await?;
    Ok(Json(ApiResponse::list(employees)))
}

/// POST /api/companies/{id}/employees
pub async fn add_employee(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    ApiPath(company_id): ApiPath<i32>,
    ApiJson(request): ApiJson<AddEmployeeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Employee>>), ApiError> {
    let employee = state
        .workforce
        .add_employee(company_id, request.user_id, request.role)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(employee).with_message("Employee added")),
    ))
}

/// PUT /api/companies/{id}/employees/{employee_id}
pub async fn update_employee_role(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    ApiPath((company_id, employee_id)): ApiPath<(i32, i32)>,
    ApiJson(request): ApiJson<UpdateRoleRequest>,
) -> Result<Json<ApiResponse<Employee>>, ApiError> {
    let employee = state
        .workforce
        .update_role(company_id, employee_id, request.role)
        .await?;
    Ok(Json(ApiResponse::success(employee).with_message("Employee role updated")))
}

/// DELETE /api/companies/{id}/employees/{employee_id}
pub async fn remove_employee(
    State(state): State<AppState>,
    AuthUser(_user): AuthUser,
    ApiPath((company_id, employee_id)): ApiPath<(i32, i32)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    if !state.workforce.remove_employee(company_id, employee_id).await? {
        return Err(ApiError::NotFound(format!(
            "Employee {} not found in company {}",
            employee_id, company_id
        )));
    }
    Ok(Json(ApiResponse::message("Employee removed")))
}
