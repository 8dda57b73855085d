//! Reservation Model (预订)
//!
//! 预订通过 `tables` 字段持有桌台链接：可以跨多张桌台（组合分配），
//! 也可以与其他预订共用一张拼桌。只有 PENDING / CONFIRMED 计入容量。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::types::{AssignmentType, ReservationStatus};
use surrealdb::RecordId;

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    /// Calendar day, "YYYY-MM-DD"
    pub date: String,
    #[serde(with = "serde_helpers::record_id")]
    pub time_slot: RecordId,
    /// Party size
    pub people: i32,
    #[serde(default)]
    pub status: ReservationStatus,
    /// Linked tables; empty = not assigned yet
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub tables: Vec<RecordId>,
    /// Communal-seating warning recorded with the assignment
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_shared_seating: bool,
    pub assignment_type: Option<AssignmentType>,
    pub note: Option<String>,
    pub created_at: Option<i64>,
    pub updated_at: Option<i64>,
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
    pub date: String,
    #[serde(with = "serde_helpers::record_id")]
    pub time_slot: RecordId,
    pub people: i32,
    pub note: Option<String>,
    /// 创建时自动分桌（默认开启）
    #[serde(default = "default_true")]
    pub auto_assign: bool,
}

fn default_true() -> bool {
    true
}

/// Update reservation payload (customer details only; status and tables
/// have dedicated endpoints)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Status transition payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}

/// Manual table assignment payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationTablesUpdate {
    #[serde(with = "serde_helpers::vec_record_id")]
    pub tables: Vec<RecordId>,
}

/// Seat consumption row for capacity aggregation
///
/// One aggregation query per assignment request returns these; the seating
/// core folds them per table in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationSeat {
    #[serde(with = "serde_helpers::record_id")]
    pub time_slot: RecordId,
    pub people: i32,
    #[serde(default, with = "serde_helpers::vec_record_id")]
    pub tables: Vec<RecordId>,
}
