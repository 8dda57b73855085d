//! Shift Model (班次管理)
//!
//! 现金班次：开班备用金 + 班次内现金进出 = 预期现金；
//! 收班时盘点实际现金并记录差异。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::types::{MovementKind, ShiftStatus};
use surrealdb::RecordId;

/// Shift entity (班次)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shift {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,

    /// 操作员姓名快照
    pub operator_name: String,

    #[serde(default)]
    pub status: ShiftStatus,

    /// 开班时间 (Unix timestamp millis)
    pub start_time: i64,

    /// 收班时间 (Unix timestamp millis)
    pub end_time: Option<i64>,

    /// 备用金 (开班时的现金准备金)
    #[serde(default)]
    pub starting_cash: f64,

    /// 预期现金 (starting_cash + 班次内现金进出)
    #[serde(default)]
    pub expected_cash: f64,

    /// 实际现金 (收班时盘点)
    pub actual_cash: Option<f64>,

    /// 现金差异 (actual_cash - expected_cash)
    pub cash_variance: Option<f64>,

    /// 备注
    pub note: Option<String>,
}

/// Cash movement inside a shift (现金进出)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovement {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub shift: RecordId,
    pub kind: MovementKind,
    pub amount: f64,
    pub reason: Option<String>,
    pub created_at: i64,
}

/// Create shift payload (开班)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub operator_name: String,
    #[serde(default)]
    pub starting_cash: f64,
    pub note: Option<String>,
}

/// Close shift payload (收班)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftClose {
    pub actual_cash: f64,
    pub note: Option<String>,
}

/// Record a cash movement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CashMovementCreate {
    pub kind: MovementKind,
    pub amount: f64,
    pub reason: Option<String>,
}
