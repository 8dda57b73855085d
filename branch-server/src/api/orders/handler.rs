//! Order API Handlers
//!
//! 开单 / 换桌参考与预订相同的桌台占用事实：人工状态覆盖优先，
//! 目标桌台上已有未结订单时拒绝。

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{DiningTable, Order, OrderComplete, OrderCreate, OrderMoveTable};
use crate::db::repository::{parse_record_id, DiningTableRepository, OrderRepository};
use crate::utils::{AppError, AppResult};
use shared::types::{OrderType, TableStatus};
use surrealdb::RecordId;

/// Query params for listing open orders
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub branch: String,
}

/// GET /api/orders?branch= - 未结订单列表
pub async fn list_open(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Order>>> {
    let branch = parse_record_id(&query.branch)?;
    let repo = OrderRepository::new(state.db.clone());
    let orders = repo.find_open_by_branch(&branch).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id - 获取单个订单
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;
    Ok(Json(order))
}

/// POST /api/orders - 开单
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if payload.order_type == OrderType::DineIn && payload.table.is_none() {
        return Err(AppError::validation("Dine-in orders require a table"));
    }

    if let Some(table_id) = payload.table.clone() {
        claim_table(&state, &table_id).await?;
        let repo = OrderRepository::new(state.db.clone());
        let order = repo.create(payload).await?;
        // 绑定桌台后立即反映到楼面图
        DiningTableRepository::new(state.db.clone())
            .set_status(&table_id.to_string(), TableStatus::Occupied)
            .await?;
        return Ok(Json(order));
    }

    let repo = OrderRepository::new(state.db.clone());
    let order = repo.create(payload).await?;
    Ok(Json(order))
}

/// PUT /api/orders/:id/table - 换桌
pub async fn move_table(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderMoveTable>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Order {} not found", id)))?;

    if order.status != shared::types::OrderStatus::Open {
        return Err(AppError::business_rule("Only open orders can be moved"));
    }

    claim_table(&state, &payload.table).await?;

    let tables = DiningTableRepository::new(state.db.clone());
    let updated = repo.move_table(&id, payload.table.clone()).await?;

    // 释放旧桌台，占用新桌台
    if let Some(old_table) = &order.table {
        tables
            .set_status(&old_table.to_string(), TableStatus::Empty)
            .await?;
    }
    tables
        .set_status(&payload.table.to_string(), TableStatus::Occupied)
        .await?;

    Ok(Json(updated))
}

/// POST /api/orders/:id/complete - 结账
pub async fn complete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<OrderComplete>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.complete(&id, payload.subtotal, payload.total_amount).await?;
    release_table(&state, &order).await?;
    Ok(Json(order))
}

/// POST /api/orders/:id/void - 作废
pub async fn void(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.db.clone());
    let order = repo.void(&id).await?;
    release_table(&state, &order).await?;
    Ok(Json(order))
}

/// 校验并认领目标桌台：必须可用且没有未结订单
async fn claim_table(state: &ServerState, table_id: &RecordId) -> AppResult<DiningTable> {
    let tables = DiningTableRepository::new(state.db.clone());
    let table = tables
        .find_by_id(&table_id.to_string())
        .await?
        .ok_or_else(|| AppError::not_found(format!("Table {} not found", table_id)))?;

    if !table.is_available() {
        return Err(AppError::business_rule(format!(
            "Table '{}' is not available ({:?})",
            table.name, table.status
        )));
    }

    let open_orders = OrderRepository::new(state.db.clone())
        .find_open_by_table(table_id)
        .await?;
    if !open_orders.is_empty() {
        return Err(AppError::business_rule(format!(
            "Table '{}' already has an open order",
            table.name
        )));
    }

    Ok(table)
}

async fn release_table(state: &ServerState, order: &Order) -> AppResult<()> {
    if let Some(table) = &order.table {
        DiningTableRepository::new(state.db.clone())
            .set_status(&table.to_string(), TableStatus::Empty)
            .await?;
    }
    Ok(())
}
