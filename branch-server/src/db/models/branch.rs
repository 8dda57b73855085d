//! Branch Model
//!
//! 门店实体。时区为 IANA 名称，日期→星期换算统一在边界层按门店时区完成。

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Branch entity (门店)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// IANA timezone, e.g. "Europe/Madrid"
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

fn default_timezone() -> String {
    "UTC".to_string()
}

/// Create branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchCreate {
    pub name: String,
    pub timezone: Option<String>,
}

/// Update branch payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BranchUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}
