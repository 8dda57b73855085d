//! API Response types
//!
//! Standardized response envelope used by every entry point of the
//! reservation / assignment subsystem.

use serde::{Deserialize, Serialize};

/// Unified API response structure
///
/// ```json
/// {
///     "success": true,
///     "data": { ... },
///     "error": null
/// }
/// ```
///
/// `success: false` with `error: null` means "no accommodation possible" —
/// 没有可用桌台不是系统错误，前端应引导手动选桌。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create a failure response with an error message
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Create a failure response without detail (no accommodation possible)
    pub fn no_result() -> Self {
        Self {
            success: false,
            data: None,
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_result_omits_error_field() {
        let resp: ApiResponse<()> = ApiResponse::no_result();
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], false);
        assert!(json.get("error").is_none());
        assert!(json.get("data").is_none());
    }

    #[test]
    fn test_ok_carries_data() {
        let resp = ApiResponse::ok(vec![1, 2, 3]);
        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["data"], serde_json::json!([1, 2, 3]));
    }
}
