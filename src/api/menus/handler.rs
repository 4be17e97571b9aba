//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Menu, MenuCreate, MenuUpdate};
use crate::db::repository::MenuRepository;
use crate::utils::validation::{MAX_NAME_LEN, validate_required_text};
use crate::utils::{ApiResponse, AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct MenuListQuery {
    /// Optional category filter ("category:id")
    pub category: Option<String>,
}

/// GET /api/menus?category= - 获取菜单列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuListQuery>,
) -> AppResult<ApiResponse<Vec<Menu>>> {
    let repo = MenuRepository::new(state.db.clone());
    let menus = match query.category.as_deref() {
        Some(category) => repo.find_by_category(category).await,
        None => repo.find_all().await,
    }
    .map_err(AppError::from)?;
    Ok(ApiResponse::ok("Menus fetched successfully", menus))
}

/// GET /api/menus/:id - 获取单个菜单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Menu>> {
    let repo = MenuRepository::new(state.db.clone());
    let menu = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Menu not found"))?;
    Ok(ApiResponse::ok("Menu fetched successfully", menu))
}

/// POST /api/menus - 创建菜单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuCreate>,
) -> AppResult<ApiResponse<Menu>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;

    let repo = MenuRepository::new(state.db.clone());
    let menu = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created("Menu created successfully", menu))
}

/// PUT /api/menus/:id - 更新菜单 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<ApiResponse<Menu>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }

    let repo = MenuRepository::new(state.db.clone());
    let menu = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Menu updated successfully", menu))
}
