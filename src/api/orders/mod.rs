//! Order API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders | GET | 分页列表 (桌台联查) |
//! | /api/orders | POST | 创建订单 (冻结商品快照) |
//! | /api/orders | DELETE | 批量软删除 |
//! | /api/orders/{id}/status | PUT | 状态迁移 (FSM 校验) |
//! | /api/orders/{id}/pay | PUT | 支付记录 |
//! | /api/orders/stats | GET | 今日/本月营收 |
//! | /api/orders/dashboard | GET | 看板聚合 |
//! | /api/orders/chart | GET | 销售时间序列 (补零桶) |

pub mod chart;
mod handler;

use axum::{
    Router,
    routing::{get, put},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::delete_many),
        )
        // Aggregation routes must be before /{id} to avoid path conflicts
        .route("/stats", get(handler::stats))
        .route("/dashboard", get(handler::dashboard))
        .route("/chart", get(handler::chart))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/status", put(handler::update_status))
        .route("/{id}/pay", put(handler::pay))
}
