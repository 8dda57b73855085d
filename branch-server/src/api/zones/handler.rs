//! Zone API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{DiningTable, Zone, ZoneCreate, ZoneUpdate};
use crate::db::repository::{parse_record_id, DiningTableRepository, ZoneRepository};
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};

/// Query params for listing zones
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
}

/// GET /api/zones?branch= - 获取门店所有区域
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Zone>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = ZoneRepository::new(state.db.clone());
    let zones = repo.find_by_branch(&branch).await?;
    Ok(Json(zones))
}

/// GET /api/zones/:id - 获取单个区域
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Zone>> {
    let repo = ZoneRepository::new(state.db.clone());
    let zone = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Zone {} not found", id)))?;
    Ok(Json(zone))
}

/// POST /api/zones - 创建区域
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ZoneCreate>,
) -> AppResult<Json<Zone>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    let repo = ZoneRepository::new(state.db.clone());
    let zone = repo.create(payload).await?;
    Ok(Json(zone))
}

/// PUT /api/zones/:id - 更新区域
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ZoneUpdate>,
) -> AppResult<Json<Zone>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    let repo = ZoneRepository::new(state.db.clone());
    let zone = repo.update(&id, payload).await?;
    Ok(Json(zone))
}

/// DELETE /api/zones/:id - 删除区域 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ZoneRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/zones/:id/tables - 获取区域内的所有桌台
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(zone_id): Path<String>,
) -> AppResult<Json<Vec<DiningTable>>> {
    let repo = DiningTableRepository::new(state.db.clone());
    let tables = repo.find_by_zone(&zone_id).await?;
    Ok(Json(tables))
}
