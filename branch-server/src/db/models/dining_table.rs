//! Dining Table Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::types::TableStatus;
use surrealdb::RecordId;

/// Dining table entity (桌台)
///
/// `status` 是人工覆盖状态：非 EMPTY 时桌台对自动分桌不可用，
/// 无论算出的剩余容量是多少。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTable {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    /// Zone reference
    #[serde(with = "serde_helpers::record_id")]
    pub zone: RecordId,
    pub name: String,
    #[serde(default)]
    pub capacity: i32,
    /// 拼桌桌台：可同时容纳多组客人，容量按座位数递减
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_shared: bool,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub status: TableStatus,
}

fn default_true() -> bool {
    true
}

impl DiningTable {
    /// Effective availability: active AND no manual override
    pub fn is_available(&self) -> bool {
        self.is_active && self.status.is_available()
    }
}

/// Create dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    #[serde(with = "serde_helpers::record_id")]
    pub zone: RecordId,
    pub name: String,
    pub capacity: Option<i32>,
    #[serde(default)]
    pub is_shared: bool,
}

/// Update dining table payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningTableUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "serde_helpers::option_record_id"
    )]
    pub zone: Option<RecordId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_shared: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Manual status override payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableStatusUpdate {
    pub status: TableStatus,
}
