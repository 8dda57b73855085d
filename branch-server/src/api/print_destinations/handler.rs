//! Print Destination API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{PrintDestination, PrintDestinationCreate, PrintDestinationUpdate};
use crate::db::repository::{parse_record_id, PrintDestinationRepository};
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};
use shared::types::PrinterKind;

/// Query params for listing destinations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
}

/// Query params for ticket routing
#[derive(Debug, Deserialize)]
pub struct RouteQuery {
    pub branch: String,
    pub kind: PrinterKind,
}

/// GET /api/print_destinations?branch= - 票据路由目标列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<PrintDestination>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = PrintDestinationRepository::new(state.db.clone());
    let destinations = repo.find_by_branch(&branch).await?;
    Ok(Json(destinations))
}

/// GET /api/print_destinations/route?branch=&kind= - 票据路由查找
pub async fn route_ticket(
    State(state): State<ServerState>,
    Query(query): Query<RouteQuery>,
) -> AppResult<Json<PrintDestination>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = PrintDestinationRepository::new(state.db.clone());
    let destination = repo
        .find_for_kind(&branch, query.kind)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("No active {:?} destination configured", query.kind))
        })?;
    Ok(Json(destination))
}

/// GET /api/print_destinations/:id - 获取单个目标
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<PrintDestination>> {
    let repo = PrintDestinationRepository::new(state.db.clone());
    let destination = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Print destination {} not found", id)))?;
    Ok(Json(destination))
}

/// POST /api/print_destinations - 创建目标
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PrintDestinationCreate>,
) -> AppResult<Json<PrintDestination>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.address, "address", MAX_NAME_LEN)?;

    let repo = PrintDestinationRepository::new(state.db.clone());
    let destination = repo.create(payload).await?;
    Ok(Json(destination))
}

/// PUT /api/print_destinations/:id - 更新目标
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PrintDestinationUpdate>,
) -> AppResult<Json<PrintDestination>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let repo = PrintDestinationRepository::new(state.db.clone());
    let destination = repo.update(&id, payload).await?;
    Ok(Json(destination))
}

/// DELETE /api/print_destinations/:id - 删除目标
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = PrintDestinationRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
