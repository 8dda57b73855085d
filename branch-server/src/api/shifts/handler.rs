//! Shift API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CashMovement, CashMovementCreate, Shift, ShiftClose, ShiftCreate};
use crate::db::repository::{parse_record_id, ShiftRepository};
use crate::utils::validation::{
    validate_optional_text, validate_required_text, MAX_NAME_LEN, MAX_NOTE_LEN,
};
use crate::utils::{AppError, AppResult};

/// Validate a cash amount is finite and non-negative
fn validate_cash(value: f64, field: &str) -> AppResult<()> {
    if !value.is_finite() {
        return Err(AppError::validation(format!(
            "{field} must be a finite number"
        )));
    }
    if value < 0.0 {
        return Err(AppError::validation(format!(
            "{field} must be non-negative, got {value}"
        )));
    }
    Ok(())
}

/// Query params for listing shifts
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    50
}

/// Query params for the current shift
#[derive(Debug, Deserialize)]
pub struct CurrentQuery {
    pub branch: String,
}

/// GET /api/shifts?branch=&limit= - 班次列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Shift>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = ShiftRepository::new(state.db.clone());
    let shifts = repo.find_by_branch(&branch, query.limit).await?;
    Ok(Json(shifts))
}

/// GET /api/shifts/current?branch= - 当前班次
pub async fn get_current(
    State(state): State<ServerState>,
    Query(query): Query<CurrentQuery>,
) -> AppResult<Json<Option<Shift>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = ShiftRepository::new(state.db.clone());
    let current = repo.find_open(&branch).await?;
    Ok(Json(current))
}

/// GET /api/shifts/:id - 获取单个班次
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Shift>> {
    let repo = ShiftRepository::new(state.db.clone());
    let shift = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Shift {} not found", id)))?;
    Ok(Json(shift))
}

/// POST /api/shifts - 开班
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ShiftCreate>,
) -> AppResult<Json<Shift>> {
    validate_cash(payload.starting_cash, "starting_cash")?;
    validate_required_text(&payload.operator_name, "operator_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = ShiftRepository::new(state.db.clone());
    let shift = repo.create(payload).await?;
    Ok(Json(shift))
}

/// POST /api/shifts/:id/close - 收班
pub async fn close(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ShiftClose>,
) -> AppResult<Json<Shift>> {
    validate_cash(payload.actual_cash, "actual_cash")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = ShiftRepository::new(state.db.clone());
    let shift = repo.close(&id, payload).await?;
    Ok(Json(shift))
}

/// GET /api/shifts/:id/movements - 现金进出列表
pub async fn list_movements(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<CashMovement>>> {
    let repo = ShiftRepository::new(state.db.clone());
    let movements = repo.find_movements(&id).await?;
    Ok(Json(movements))
}

/// POST /api/shifts/:id/movements - 记录现金进出
pub async fn add_movement(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CashMovementCreate>,
) -> AppResult<Json<CashMovement>> {
    validate_cash(payload.amount, "amount")?;
    validate_optional_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let repo = ShiftRepository::new(state.db.clone());
    let movement = repo.add_movement(&id, payload).await?;
    Ok(Json(movement))
}
