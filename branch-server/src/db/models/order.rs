//! Order Model
//!
//! 轻量订单：可选绑定一张桌台。换桌时参考与预订相同的占用事实
//! （人工状态覆盖 + 目标桌台上的未结订单）。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::types::{OrderStatus, OrderType};
use surrealdb::RecordId;

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub receipt_number: String,
    pub order_type: OrderType,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub table: Option<RecordId>,
    pub guest_count: Option<i32>,
    #[serde(default)]
    pub status: OrderStatus,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub total_amount: f64,
    /// Unix millis
    pub start_time: i64,
    pub end_time: Option<i64>,
}

/// Create order payload (开单)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub order_type: OrderType,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub table: Option<RecordId>,
    pub guest_count: Option<i32>,
}

/// Complete order payload (结账)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderComplete {
    pub subtotal: f64,
    pub total_amount: f64,
}

/// Move order to another table payload (换桌)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderMoveTable {
    #[serde(with = "serde_helpers::record_id")]
    pub table: RecordId,
}
