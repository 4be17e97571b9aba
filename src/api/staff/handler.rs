//! Staff API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Staff, StaffCreate, StaffUpdate};
use crate::db::repository::StaffRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative,
    validate_required_text,
};
use crate::utils::{ApiResponse, AppError, AppResult, DeleteManyRequest, DeleteManyResponse};

/// GET /api/staff - 获取所有员工
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Staff>>> {
    let repo = StaffRepository::new(state.db.clone());
    let staff = repo.find_all().await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Staff fetched successfully", staff))
}

/// GET /api/staff/:id - 获取单个员工
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Staff>> {
    let repo = StaffRepository::new(state.db.clone());
    let staff = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Staff not found"))?;
    Ok(ApiResponse::ok("Staff fetched successfully", staff))
}

/// POST /api/staff - 创建员工
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StaffCreate>,
) -> AppResult<ApiResponse<Staff>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_non_negative(payload.salary, "salary")?;

    let repo = StaffRepository::new(state.db.clone());
    let staff = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created("Staff created successfully", staff))
}

/// PUT /api/staff/:id - 更新员工 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<StaffUpdate>,
) -> AppResult<ApiResponse<Staff>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(salary) = payload.salary {
        validate_non_negative(salary, "salary")?;
    }

    let repo = StaffRepository::new(state.db.clone());
    let staff = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Staff updated successfully", staff))
}

/// DELETE /api/staff - 批量软删除
pub async fn delete_many(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteManyRequest>,
) -> AppResult<ApiResponse<DeleteManyResponse>> {
    if payload.ids.is_empty() {
        return Err(AppError::validation("ids must not be empty"));
    }

    let repo = StaffRepository::new(state.db.clone());
    let deleted_count = repo
        .delete_many(&payload.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Staff deleted successfully",
        DeleteManyResponse { deleted_count },
    ))
}
