//! Order API 模块

mod handler;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list_open).post(handler::create))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/table", put(handler::move_table))
        .route("/{id}/complete", post(handler::complete))
        .route("/{id}/void", post(handler::void))
}
