//! The `{code, message, data}` envelope every gateway response is wrapped in.
//!
//! The HTTP status is always 200; callers branch on `code`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use project_common::error_code::ErrorCode;
use serde::Serialize;

pub const SUCCESS_CODE: i32 = 200;
const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Serialize)]
pub struct ApiResult<T> {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResult<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
        }
    }

    /// Success without a payload.
    pub fn ok() -> Self {
        Self {
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            data: None,
        }
    }

    pub fn fail(code: ErrorCode) -> Self {
        Self {
            code: code.code(),
            message: code.message().to_string(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResult<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Handler failure, rendered as a failure envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct ApiError(pub ErrorCode);

impl ApiError {
    pub fn code(&self) -> ErrorCode {
        self.0
    }
}

impl From<ErrorCode> for ApiError {
    fn from(code: ErrorCode) -> Self {
        ApiError(code)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        ApiResult::<()>::fail(self.0).into_response()
    }
}
