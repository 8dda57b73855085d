//! Shift API 模块

mod handler;

use axum::{
    routing::{get, post},
    Router,
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/shifts", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route("/current", get(handler::get_current))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/close", post(handler::close))
        .route(
            "/{id}/movements",
            get(handler::list_movements).post(handler::add_movement),
        )
}
