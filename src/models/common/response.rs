use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::{ErrorCode, Pagination};

/// Uniform response envelope
///
/// `success` mirrors `code == 0`; `error` carries the underlying failure
/// detail for server faults.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub struct ApiResponse<T: TS> {
    pub success: bool,
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl<T: TS> ApiResponse<T> {
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: Some(data),
            pagination: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn paginated(data: T, pagination: Pagination, message: impl Into<String>) -> Self {
        Self {
            pagination: Some(pagination),
            ..Self::success(data, message)
        }
    }
}

impl ApiResponse<()> {
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            code: ErrorCode::Success as i32,
            message: message.into(),
            data: None,
            pagination: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    pub fn error_empty(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            success: false,
            code: code as i32,
            message: message.into(),
            data: None,
            pagination: None,
            error: None,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Failure envelope with the underlying error message attached
    pub fn error_with_detail(
        code: ErrorCode,
        message: impl Into<String>,
        detail: impl ToString,
    ) -> Self {
        Self {
            error: Some(detail.to_string()),
            ..Self::error_empty(code, message)
        }
    }
}
