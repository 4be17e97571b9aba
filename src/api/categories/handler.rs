//! Category API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Category, CategoryCreate, CategoryUpdate};
use crate::db::repository::CategoryRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/categories - 获取所有分类
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<Category>>> {
    let repo = CategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Categories fetched successfully", categories))
}

/// GET /api/categories/:id - 获取单个分类
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Category>> {
    let repo = CategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Category not found"))?;
    Ok(ApiResponse::ok("Category fetched successfully", category))
}

/// POST /api/categories - 创建分类
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CategoryCreate>,
) -> AppResult<ApiResponse<Category>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created("Category created successfully", category))
}

/// PUT /api/categories/:id - 更新分类 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CategoryUpdate>,
) -> AppResult<ApiResponse<Category>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let repo = CategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Category updated successfully", category))
}
