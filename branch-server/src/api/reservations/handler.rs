//! Reservation API Handlers
//!
//! 创建与 `/assign` 返回统一信封：
//! `{ success, data: { reservation, tableIds, totalCapacity,
//! assignmentType, isSharedTableOnly }, error }`。
//! `success: false` 且无 `error` 表示没有可分配桌台——前端据此引导
//! 操作员手动选桌，而不是当作系统错误。

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{
    Reservation, ReservationCreate, ReservationStatusUpdate, ReservationTablesUpdate,
    ReservationUpdate,
};
use crate::db::repository::{
    parse_record_id, reservation::ReservationFilter, ReservationRepository,
};
use crate::services::NotifyEvent;
use crate::utils::time::parse_date;
use crate::utils::validation::{
    validate_optional_text, validate_positive, validate_required_text, MAX_NAME_LEN, MAX_NOTE_LEN,
};
use crate::utils::{AppError, AppResult};
use shared::response::ApiResponse;
use shared::types::{ReservationStatus, TableAssignment};

/// Assignment envelope body: the reservation plus the flattened
/// assignment contract fields
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignBody {
    pub reservation: Reservation,
    #[serde(flatten)]
    pub assignment: Option<TableAssignment>,
}

/// Query params for listing reservations
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
    pub date: Option<String>,
    pub time_slot: Option<String>,
    pub status: Option<ReservationStatus>,
}

/// GET /api/reservations?branch=&date=&time_slot=&status= - 预订列表
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Reservation>>> {
    let branch = parse_record_id(&query.branch)?;
    if let Some(date) = &query.date {
        parse_date(date)?;
    }
    let filter = ReservationFilter {
        date: query.date,
        time_slot: query
            .time_slot
            .as_deref()
            .map(parse_record_id)
            .transpose()?,
        status: query.status,
    };
    let repo = ReservationRepository::new(state.db.clone());
    let reservations = repo.list(&branch, filter).await?;
    Ok(Json(reservations))
}

/// GET /api/reservations/:id - 获取单个预订
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;
    Ok(Json(reservation))
}

/// POST /api/reservations - 创建预订（默认自动分桌）
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReservationCreate>,
) -> AppResult<Json<ApiResponse<AssignBody>>> {
    validate_required_text(&payload.customer_name, "customer_name", MAX_NAME_LEN)?;
    validate_positive(payload.people, "people")?;
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;
    parse_date(&payload.date)?;

    let auto_assign = payload.auto_assign;
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.create(payload).await?;

    if !auto_assign {
        return Ok(Json(ApiResponse::ok(AssignBody {
            reservation,
            assignment: None,
        })));
    }

    run_assignment(&state, reservation).await
}

/// POST /api/reservations/:id/assign - 重跑自动分桌
pub async fn assign(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AssignBody>>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    run_assignment(&state, reservation).await
}

async fn run_assignment(
    state: &ServerState,
    reservation: Reservation,
) -> AppResult<Json<ApiResponse<AssignBody>>> {
    match state.seating().assign_reservation(&reservation).await? {
        Some((updated, assignment)) => Ok(Json(ApiResponse::ok(AssignBody {
            reservation: updated,
            assignment: Some(assignment),
        }))),
        // 没有容量：正常否定结果，信封不携带 error
        None => {
            let mut resp = ApiResponse::no_result();
            resp.data = Some(AssignBody {
                reservation,
                assignment: None,
            });
            Ok(Json(resp))
        }
    }
}

/// PUT /api/reservations/:id - 更新客户信息
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationUpdate>,
) -> AppResult<Json<Reservation>> {
    if let Some(name) = &payload.customer_name {
        validate_required_text(name, "customer_name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.note, "note", MAX_NOTE_LEN)?;

    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo.update(&id, payload).await?;
    Ok(Json(reservation))
}

/// PUT /api/reservations/:id/tables - 手动指定桌台
pub async fn set_tables(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationTablesUpdate>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    let reservation = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let updated = state
        .seating()
        .assign_manual(&reservation, payload.tables)
        .await?;
    Ok(Json(updated))
}

/// PUT /api/reservations/:id/status - 状态变迁
///
/// 桌台状态随之同步（仅限当日、非拼桌桌台）；CONFIRMED / CANCELED
/// 触发通知。
pub async fn set_status(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReservationStatusUpdate>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let reservation = repo.set_status(&id, payload.status).await?;
    state.seating().sync_table_status(&reservation).await?;

    match reservation.status {
        ReservationStatus::Confirmed => state
            .notify
            .notify_reservation(NotifyEvent::ReservationConfirmed, &reservation),
        ReservationStatus::Canceled => state
            .notify
            .notify_reservation(NotifyEvent::ReservationCanceled, &reservation),
        _ => {}
    }

    Ok(Json(reservation))
}

/// DELETE /api/reservations/:id - 取消预订
pub async fn cancel(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Reservation>> {
    let repo = ReservationRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Reservation {} not found", id)))?;

    let reservation = repo.set_status(&id, ReservationStatus::Canceled).await?;
    state.seating().sync_table_status(&reservation).await?;
    state
        .notify
        .notify_reservation(NotifyEvent::ReservationCanceled, &reservation);

    Ok(Json(reservation))
}
