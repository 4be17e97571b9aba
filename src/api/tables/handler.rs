//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use crate::db::repository::{DiningTableRepository, OrderRepository};
use crate::utils::validation::validate_min_int;
use crate::utils::{ApiResponse, AppError, AppResult};

/// GET /api/tables - 获取所有桌台 (楼层、桌号排序)
pub async fn list(State(state): State<ServerState>) -> AppResult<ApiResponse<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_all().await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Tables fetched successfully", tables))
}

/// 桌台占用统计
#[derive(Debug, Serialize)]
pub struct OccupancyCount {
    #[serde(rename = "totalTables")]
    pub total_tables: u64,
    #[serde(rename = "occupiedTables")]
    pub occupied_tables: u64,
}

/// GET /api/tables/occupancy-count - 桌台占用统计
///
/// 占用 = 仍有未完结订单 (状态非 completed) 的去重桌台数。
pub async fn occupancy_count(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<OccupancyCount>> {
    let tables = DiningTableRepository::new(state.db.clone());
    let orders = OrderRepository::new(state.db.clone());

    let total_tables = tables.count().await.map_err(AppError::from)?;
    let occupied = orders.unsettled_table_ids().await.map_err(AppError::from)?;

    Ok(ApiResponse::ok(
        "Occupancy fetched successfully",
        OccupancyCount {
            total_tables,
            occupied_tables: occupied.len() as u64,
        },
    ))
}

/// GET /api/tables/:id - 获取单个桌台
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<DiningTable>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Table not found"))?;
    Ok(ApiResponse::ok("Table fetched successfully", table))
}

/// POST /api/tables - 创建桌台
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<ApiResponse<DiningTable>> {
    validate_min_int(payload.number as i64, 1, "number")?;
    validate_min_int(payload.capacity as i64, 1, "capacity")?;

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created("Table created successfully", table))
}

/// PUT /api/tables/:id - 更新桌台 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<ApiResponse<DiningTable>> {
    if let Some(number) = payload.number {
        validate_min_int(number as i64, 1, "number")?;
    }
    if let Some(capacity) = payload.capacity {
        validate_min_int(capacity as i64, 1, "capacity")?;
    }

    let repo = DiningTableRepository::new(state.db.clone());
    let table = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Table updated successfully", table))
}
