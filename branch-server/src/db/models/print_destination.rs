//! Print Destination Model
//!
//! 票据路由目标：小票/厨打/吧台。只负责路由查找，打印协议不在本层。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use shared::types::PrinterKind;
use surrealdb::RecordId;

/// Print destination entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintDestination {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub name: String,
    pub kind: PrinterKind,
    /// Network address, e.g. "192.168.1.50:9100"
    pub address: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

/// Create print destination payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintDestinationCreate {
    #[serde(with = "serde_helpers::record_id")]
    pub branch: RecordId,
    pub name: String,
    pub kind: PrinterKind,
    pub address: String,
}

/// Update print destination payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrintDestinationUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<PrinterKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
