//! Order API Handlers

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::orders::chart::{ChartPeriod, ChartPoint, build_series, period_range};
use crate::core::ServerState;
use crate::db::models::{
    Order, OrderCreate, OrderPay, OrderStatusUpdate, OrderWithTable, TableView,
};
use crate::db::repository::{DiningTableRepository, OrderRepository, ProductRepository};
use crate::utils::validation::{MAX_NAME_LEN, validate_non_negative, validate_required_text};
use crate::utils::{
    ApiResponse, AppError, AppResult, DeleteManyRequest, DeleteManyResponse, PageQuery, Pagination,
    time,
};

/// 分页订单列表结果
#[derive(Debug, Serialize)]
pub struct OrderListResult {
    pub orders: Vec<OrderWithTable>,
    pub pagination: Pagination,
}

/// GET /api/orders?page=&limit= - 分页获取订单 (桌台联查)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<ApiResponse<OrderListResult>> {
    let (page, limit) = query.normalize();
    let repo = OrderRepository::new(state.db.clone());
    let (orders, total) = repo.find_page(page, limit).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Orders fetched successfully",
        OrderListResult {
            orders,
            pagination: Pagination::new(page, limit, total),
        },
    ))
}

/// GET /api/orders/:id - 获取单个订单 (桌台联查)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<ApiResponse<OrderWithTable>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    Ok(ApiResponse::ok(
        "Order fetched successfully",
        attach_table(&state, order).await?,
    ))
}

/// POST /api/orders - 创建订单
///
/// 逐行冻结商品快照；订单号来自原子计数器。
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<ApiResponse<OrderWithTable>> {
    validate_required_text(&payload.customer.name, "customer.name", MAX_NAME_LEN)?;
    if payload.products.is_empty() {
        return Err(AppError::validation("Order must contain at least one product"));
    }

    // 批量解析商品引用；缺失的行由仓储层整单拒绝 (桌台检查在先)
    let product_ids: Vec<String> = payload
        .products
        .iter()
        .map(|line| line.product.to_string())
        .collect();
    let products = ProductRepository::new(state.db.clone())
        .find_many_by_ids(&product_ids)
        .await
        .map_err(AppError::from)?;

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload, &products).await.map_err(AppError::from)?;

    tracing::info!(order_number = order.order_number, "Order created");

    Ok(ApiResponse::created(
        "Order created successfully",
        attach_table(&state, order).await?,
    ))
}

/// PUT /api/orders/:id/status - 状态迁移
///
/// `in process → completed | cancelled`；终态不可再迁移，同值写入为无操作。
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<ApiResponse<OrderWithTable>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .update_status(&id, payload.status)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Order status updated successfully",
        attach_table(&state, order).await?,
    ))
}

/// PUT /api/orders/:id/pay - 记录支付
///
/// 只覆盖金额字段，不自动完成订单——营收统计只认 completed，
/// 调用方需要随后调用状态迁移。
pub async fn pay(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderPay>,
) -> AppResult<ApiResponse<OrderWithTable>> {
    validate_non_negative(payload.price, "price")?;
    validate_non_negative(payload.tax, "tax")?;
    validate_non_negative(payload.total_price, "totalPrice")?;
    if let Some(tip) = payload.tip {
        validate_non_negative(tip, "tip")?;
    }
    if payload.date < 0 {
        return Err(AppError::validation("date must be a non-negative timestamp"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.pay(&id, payload).await.map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Order payment recorded successfully",
        attach_table(&state, order).await?,
    ))
}

/// DELETE /api/orders - 批量软删除
pub async fn delete_many(
    State(state): State<ServerState>,
    Json(payload): Json<DeleteManyRequest>,
) -> AppResult<ApiResponse<DeleteManyResponse>> {
    if payload.ids.is_empty() {
        return Err(AppError::validation("ids must not be empty"));
    }

    let repo = OrderRepository::new(state.db.clone());
    let deleted_count = repo
        .delete_many(&payload.ids)
        .await
        .map_err(AppError::from)?;
    Ok(ApiResponse::ok(
        "Orders deleted successfully",
        DeleteManyResponse { deleted_count },
    ))
}

// ---------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------

/// 今日/本月营收
#[derive(Debug, Serialize)]
pub struct StatsResult {
    #[serde(rename = "todaySales")]
    pub today_sales: f64,
    #[serde(rename = "monthlySales")]
    pub monthly_sales: f64,
}

/// GET /api/orders/stats - 今日与整月 completed 营收 (零安全)
pub async fn stats(State(state): State<ServerState>) -> AppResult<ApiResponse<StatsResult>> {
    let tz = state.config.timezone;
    let today = time::today(tz);
    let repo = OrderRepository::new(state.db.clone());

    let today_sales = repo
        .sum_completed_revenue(time::day_start_millis(today, tz), time::day_end_millis(today, tz))
        .await
        .map_err(AppError::from)?;
    let monthly_sales = repo
        .sum_completed_revenue(
            time::day_start_millis(time::month_start(today), tz),
            time::day_start_millis(time::next_month_start(today), tz),
        )
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::ok(
        "Stats fetched successfully",
        StatsResult {
            today_sales,
            monthly_sales,
        },
    ))
}

/// 看板热销商品条目
///
/// 展示字段优先取订单行快照，快照缺失时回退到在售商品。
#[derive(Debug, Serialize)]
pub struct PopularProduct {
    /// 商品引用 ("product:id")
    pub product: String,
    pub name: String,
    pub image: String,
    #[serde(rename = "productNumber")]
    pub product_number: String,
    pub price: f64,
    pub quantity: i64,
    pub revenue: f64,
}

/// 看板聚合结果
#[derive(Debug, Serialize)]
pub struct DashboardResult {
    #[serde(rename = "todaySales")]
    pub today_sales: f64,
    #[serde(rename = "monthlySales")]
    pub monthly_sales: f64,
    #[serde(rename = "totalTables")]
    pub total_tables: u64,
    #[serde(rename = "occupiedTables")]
    pub occupied_tables: u64,
    #[serde(rename = "popularProducts")]
    pub popular_products: Vec<PopularProduct>,
}

/// GET /api/orders/dashboard - 看板聚合
///
/// 今日营收、月初至今营收、桌台总数、占用桌台数 (in process 订单去重)、
/// 全量 completed 订单的销量前 4 商品。无数据时数字为 0、列表为空。
pub async fn dashboard(State(state): State<ServerState>) -> AppResult<ApiResponse<DashboardResult>> {
    let tz = state.config.timezone;
    let today = time::today(tz);
    let orders = OrderRepository::new(state.db.clone());
    let tables = DiningTableRepository::new(state.db.clone());

    let today_sales = orders
        .sum_completed_revenue(time::day_start_millis(today, tz), time::day_end_millis(today, tz))
        .await
        .map_err(AppError::from)?;
    // 月初至当前时刻，与 stats 的整月窗口不同
    let monthly_sales = orders
        .sum_completed_revenue(
            time::day_start_millis(time::month_start(today), tz),
            time::now_millis() + 1,
        )
        .await
        .map_err(AppError::from)?;

    let total_tables = tables.count().await.map_err(AppError::from)?;
    let occupied_tables = orders
        .occupied_table_ids()
        .await
        .map_err(AppError::from)?
        .len() as u64;

    let completed = orders
        .find_completed_in_range(0, i64::MAX)
        .await
        .map_err(AppError::from)?;
    let popular_products = top_products(&state, &completed, 4).await?;

    Ok(ApiResponse::ok(
        "Dashboard fetched successfully",
        DashboardResult {
            today_sales,
            monthly_sales,
            total_tables,
            occupied_tables,
            popular_products,
        },
    ))
}

#[derive(Debug, Deserialize)]
pub struct ChartQuery {
    pub period: Option<ChartPeriod>,
}

/// GET /api/orders/chart?period= - 销售时间序列 (补零桶)
pub async fn chart(
    State(state): State<ServerState>,
    Query(query): Query<ChartQuery>,
) -> AppResult<ApiResponse<Vec<ChartPoint>>> {
    let tz = state.config.timezone;
    let today = time::today(tz);
    let period = query.period.unwrap_or_default();

    let (start, end) = period_range(period, today, tz);
    let orders = OrderRepository::new(state.db.clone())
        .find_completed_in_range(start, end)
        .await
        .map_err(AppError::from)?;

    Ok(ApiResponse::ok(
        "Chart fetched successfully",
        build_series(period, today, tz, &orders),
    ))
}

// ---------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------

async fn attach_table(state: &ServerState, order: Order) -> AppResult<OrderWithTable> {
    let tables = DiningTableRepository::new(state.db.clone());
    let table_data = tables
        .find_by_id(&order.table.to_string())
        .await
        .map_err(AppError::from)?
        .map(TableView::from);
    Ok(OrderWithTable { order, table_data })
}

/// 按销量折叠 completed 订单行，取前 `limit` 名
async fn top_products(
    state: &ServerState,
    completed: &[Order],
    limit: usize,
) -> AppResult<Vec<PopularProduct>> {
    struct Acc {
        quantity: i64,
        revenue: f64,
        name: Option<String>,
        image: Option<String>,
        product_number: Option<String>,
        price: Option<f64>,
    }

    // 插入序保留，保证并列名次的顺序稳定
    let mut order_keys: Vec<String> = Vec::new();
    let mut acc: HashMap<String, Acc> = HashMap::new();

    for order in completed {
        for line in &order.products {
            let key = line.product.to_string();
            let entry = acc.entry(key.clone()).or_insert_with(|| {
                order_keys.push(key.clone());
                Acc {
                    quantity: 0,
                    revenue: 0.0,
                    name: None,
                    image: None,
                    product_number: None,
                    price: None,
                }
            });
            entry.quantity += line.quantity as i64;
            if let Some(snapshot) = &line.product_snapshot {
                entry.revenue += snapshot.price * line.quantity as f64;
                entry.name.get_or_insert_with(|| snapshot.name.clone());
                entry.image.get_or_insert_with(|| snapshot.image.clone());
                entry
                    .product_number
                    .get_or_insert_with(|| snapshot.product_number.clone());
                entry.price.get_or_insert(snapshot.price);
            }
        }
    }

    // 快照缺字段的条目回退到在售商品
    let missing: Vec<String> = order_keys
        .iter()
        .filter(|k| acc.get(*k).map(|a| a.name.is_none()).unwrap_or(false))
        .cloned()
        .collect();
    if !missing.is_empty() {
        let live = ProductRepository::new(state.db.clone())
            .find_many_by_ids(&missing)
            .await
            .map_err(AppError::from)?;
        for key in &missing {
            if let (Some(entry), Some(product)) = (acc.get_mut(key), live.get(key)) {
                entry.name.get_or_insert_with(|| product.name.clone());
                entry.image.get_or_insert_with(|| product.image.clone());
                entry
                    .product_number
                    .get_or_insert_with(|| product.product_number.clone());
                let price = *entry.price.get_or_insert(product.price);
                if entry.revenue == 0.0 {
                    entry.revenue = price * entry.quantity as f64;
                }
            }
        }
    }

    let mut ranked: Vec<(String, Acc)> = order_keys
        .into_iter()
        .filter_map(|k| acc.remove(&k).map(|a| (k, a)))
        .collect();
    // 稳定排序：并列时保持插入序
    ranked.sort_by(|a, b| b.1.quantity.cmp(&a.1.quantity));
    ranked.truncate(limit);

    Ok(ranked
        .into_iter()
        .map(|(product, a)| PopularProduct {
            product,
            name: a.name.unwrap_or_default(),
            image: a.image.unwrap_or_default(),
            product_number: a.product_number.unwrap_or_default(),
            price: a.price.unwrap_or(0.0),
            quantity: a.quantity,
            revenue: a.revenue,
        })
        .collect())
}
