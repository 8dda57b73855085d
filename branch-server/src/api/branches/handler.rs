//! Branch API Handlers

use axum::{
    extract::{Path, State},
    Json,
};

use crate::core::ServerState;
use crate::db::models::{Branch, BranchCreate, BranchUpdate};
use crate::db::repository::BranchRepository;
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};

/// GET /api/branches - 获取所有门店
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Branch>>> {
    let repo = BranchRepository::new(state.db.clone());
    let branches = repo.find_all().await?;
    Ok(Json(branches))
}

/// GET /api/branches/:id - 获取单个门店
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Branch>> {
    let repo = BranchRepository::new(state.db.clone());
    let branch = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Branch {} not found", id)))?;
    Ok(Json(branch))
}

/// POST /api/branches - 创建门店
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<BranchCreate>,
) -> AppResult<Json<Branch>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    if let Some(tz) = &payload.timezone {
        if tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::validation(format!("Unknown timezone: {}", tz)));
        }
    }

    let repo = BranchRepository::new(state.db.clone());
    let branch = repo.create(payload).await?;
    Ok(Json(branch))
}

/// PUT /api/branches/:id - 更新门店
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<BranchUpdate>,
) -> AppResult<Json<Branch>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(tz) = &payload.timezone {
        if tz.parse::<chrono_tz::Tz>().is_err() {
            return Err(AppError::validation(format!("Unknown timezone: {}", tz)));
        }
    }

    let repo = BranchRepository::new(state.db.clone());
    let branch = repo.update(&id, payload).await?;
    Ok(Json(branch))
}

/// DELETE /api/branches/:id - 停用门店 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = BranchRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}
