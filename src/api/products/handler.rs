//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate, ProductWithMenu};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative, validate_required_text,
};
use crate::utils::{
    ApiResponse, AppError, AppResult, DeleteManyRequest, DeleteManyResponse, PageQuery, Pagination,
};

/// 分页商品列表结果
#[derive(Debug, Serialize)]
pub struct ProductListResult {
    pub products: Vec<ProductWithMenu>,
    pub pagination: Pagination,
}

/// GET /api/products?page=&limit= - 分页获取商品
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<ProductListResult>> {
    let (page, limit) = query.normalize();
    let repo = ProductRepository::new(state.db.clone());
    let (products, total) = repo.find_page(page, limit).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Products fetched successfully",
        ProductListResult {
            products,
            pagination: Pagination::new(page, limit, total),
        },
    ))
}

/// GET /api/products/random - 随机商品推荐 (至多 10 个)
pub async fn random(
    State(state): State<ServerState>,
) -> AppResult<ApiResponse<Vec<ProductWithMenu>>> {
    let repo = ProductRepository::new(state.db.clone());
    let products = repo.find_random(10).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Products fetched successfully", products))
}

/// GET /api/products/:id - 获取单个商品
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<Product>> {
    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Product not found"))?;
    Ok(ApiResponse::ok("Product fetched successfully", product))
}

/// POST /api/products - 创建商品
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<ApiResponse<Product>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_required_text(&payload.product_number, "productNumber", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative(payload.price, "price")?;

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.create(payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::created("Product created successfully", product))
}

/// PUT /api/products/:id - 更新商品 (部分合并)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<ApiResponse<Product>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(number) = &payload.product_number {
        validate_required_text(number, "productNumber", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_non_negative(price, "price")?;
    }

    let repo = ProductRepository::new(state.db.clone());
    let product = repo.update(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok("Product updated successfully", product))
}

/// DELETE /api/products - 批量软删除
pub async fn delete_many(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteManyRequest>,
) -> AppResult<ApiResponse<DeleteManyResponse>> {
    if payload.ids.is_empty() {
        return Err(AppError::validation("ids must not be empty"));
    }

    let repo = ProductRepository::new(state.db.clone());
    let deleted_count = repo
        .delete_many(&payload.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Products deleted successfully",
        DeleteManyResponse { deleted_count },
    ))
}
