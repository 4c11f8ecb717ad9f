//! Address hierarchy endpoints under `/api/address`

use axum::{extract::State, Json};

use directory_core::domain::{District, Neighborhood, Province};

use crate::error::ApiError;
use crate::extract::ApiPath;
use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/address/provinces
pub async fn list_provinces(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<Province>>>, ApiError> {
    let provinces = state.address.list_provinces().await?;
    Ok(Json(ApiResponse::list(provinces)))
}

/// GET /api/address/provinces/{id}
pub async fn get_province(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Province>>, ApiError> {
    let province = state
        .address
        .get_province(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Province not found: {}", id)))?;
    Ok(Json(ApiResponse::success(province)))
}

/// GET /api/address/provinces/{id}/districts
pub async fn list_districts(
    State(state): State<AppState>,
    ApiPath(province_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<District>>>, ApiError> {
    let districts = state.address.list_districts(province_id).await?;
    Ok(Json(ApiResponse::list(districts)))
}

/// GET /api/address/provinces/{id}/districts/{district_id}/neighborhoods
pub async fn list_neighborhoods(
    State(state): State<AppState>,
    ApiPath((province_id, district_id)): ApiPath<(i32, i32)>,
) -> Result<Json<ApiResponse<Vec<Neighborhood>>>, ApiError> {
    let neighborhoods = state
        .address
        .list_neighborhoods(province_id, district_id)
        .await?;
    Ok(Json(ApiResponse::list(neighborhoods)))
}
