//! Time Slot API Handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{SlotTableBinding, TimeSlot, TimeSlotTable, TimeSlotCreate, TimeSlotUpdate};
use crate::db::repository::{parse_record_id, TimeSlotRepository};
use crate::seating::TableAvailability;
use crate::utils::time::parse_date;
use crate::utils::validation::{validate_required_text, MAX_NAME_LEN};
use crate::utils::{AppError, AppResult};

/// Query params for listing time slots
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
}

/// Query params for the availability view
#[derive(Debug, Deserialize)]
pub struct AvailabilityQuery {
    /// "YYYY-MM-DD"
    pub date: String,
}

/// GET /api/time_slots?branch= - 获取门店所有时段
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<TimeSlot>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = TimeSlotRepository::new(state.db.clone());
    let slots = repo.find_active_by_branch(&branch).await?;
    Ok(Json(slots))
}

/// GET /api/time_slots/:id - 获取单个时段
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<TimeSlot>> {
    let repo = TimeSlotRepository::new(state.db.clone());
    let slot = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", id)))?;
    Ok(Json(slot))
}

/// POST /api/time_slots - 创建时段
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<TimeSlotCreate>,
) -> AppResult<Json<TimeSlot>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_days(&payload.days_of_week)?;

    let repo = TimeSlotRepository::new(state.db.clone());
    let slot = repo.create(payload).await?;
    Ok(Json(slot))
}

/// PUT /api/time_slots/:id - 更新时段
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<TimeSlotUpdate>,
) -> AppResult<Json<TimeSlot>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(days) = &payload.days_of_week {
        validate_days(days)?;
    }

    let repo = TimeSlotRepository::new(state.db.clone());
    let slot = repo.update(&id, payload).await?;
    Ok(Json(slot))
}

/// DELETE /api/time_slots/:id - 停用时段 (软删除)
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = TimeSlotRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

/// GET /api/time_slots/:id/tables - 时段的桌台绑定
pub async fn list_tables(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<TimeSlotTable>>> {
    let slot_id = parse_record_id(&id)?;
    let repo = TimeSlotRepository::new(state.db.clone());
    let links = repo.find_links_by_slot(&slot_id).await?;
    Ok(Json(links))
}

/// PUT /api/time_slots/:id/tables - 替换时段的桌台绑定
pub async fn replace_tables(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<Vec<SlotTableBinding>>,
) -> AppResult<Json<Vec<TimeSlotTable>>> {
    let slot_id = parse_record_id(&id)?;
    let repo = TimeSlotRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", id)))?;
    let links = repo.replace_links(&slot_id, payload).await?;
    Ok(Json(links))
}

/// GET /api/time_slots/:id/availability?date= - 每桌剩余容量
///
/// 专属池桌台按精确时段口径，其余按跨重叠时段的 FCFS 口径。
pub async fn availability(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<Vec<TableAvailability>>> {
    let slot_id = parse_record_id(&id)?;
    let date = parse_date(&query.date)?;

    let repo = TimeSlotRepository::new(state.db.clone());
    let slot = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Time slot {} not found", id)))?;

    let rows = state
        .seating()
        .availability(&slot.branch, date, &slot_id)
        .await?;
    Ok(Json(rows))
}

fn validate_days(days: &[i32]) -> AppResult<()> {
    if days.iter().any(|d| !(0..=6).contains(d)) {
        return Err(AppError::validation(
            "days_of_week entries must be 0 (Sunday) through 6 (Saturday)",
        ));
    }
    Ok(())
}
