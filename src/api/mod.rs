//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`auth`] - 认证相关接口
//! - [`categories`] - 分类管理接口
//! - [`menus`] - 菜单管理接口
//! - [`products`] - 商品管理接口
//! - [`tables`] - 桌台管理接口
//! - [`staff`] - 员工管理接口
//! - [`attendance`] - 考勤接口
//! - [`reservations`] - 订座管理接口
//! - [`orders`] - 订单管理和报表接口

pub mod auth;
pub mod health;

// Data models API
pub mod attendance;
pub mod categories;
pub mod menus;
pub mod orders;
pub mod products;
pub mod reservations;
pub mod staff;
pub mod tables;

use axum::Router;
use axum::middleware as axum_middleware;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(categories::router())
        .merge(menus::router())
        .merge(products::router())
        .merge(tables::router())
        .merge(staff::router())
        .merge(attendance::router())
        .merge(reservations::router())
        .merge(orders::router())
}

/// Build a fully configured application with all middleware
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    build_router()
        // CORS - Handle cross-origin requests
        .layer(CorsLayer::permissive())
        // Trace - Request tracing (logs at INFO level)
        .layer(TraceLayer::new_for_http())
        // Get user context (JWT authentication) - injects CurrentUser
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
