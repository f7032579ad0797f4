//! 服务端错误映射
//!
//! 校验错误按原文返回 400；存储层错误记录日志后返回统一的 500 响应体，
//! 原始错误文本不出现在响应中。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use dynapi::{DynApiError, ResponseEnvelope};

/// HTTP 层错误包装
pub struct ApiError(DynApiError);

impl ApiError {
    /// 调度阶段的校验错误（缺表名、动作不合法等）
    pub fn validation(message: impl Into<String>) -> Self {
        Self(DynApiError::validation(message))
    }
}

impl From<DynApiError> for ApiError {
    fn from(err: DynApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DynApiError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
            DynApiError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed.".to_string(),
                )
            }
            DynApiError::UnsupportedDatabase(_) | DynApiError::NoPoolAvailable => {
                tracing::error!("Store configuration error: {}", self.0);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database operation failed.".to_string(),
                )
            }
        };

        (status, Json(ResponseEnvelope::error_message(message))).into_response()
    }
}
