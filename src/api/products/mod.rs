//! Product API 模块

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/products", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route(
            "/",
            get(handler::list)
                .post(handler::create)
                .delete(handler::delete_many),
        )
        // Must be before /{id} to avoid path conflicts
        .route("/random", get(handler::random))
        .route("/{id}", get(handler::get_by_id).put(handler::update))
}
