//! 边界错误映射
//!
//! 所有令牌类失败（缺失/格式错误的 Authorization 头、无效、过期、已吊销）
//! 统一为 `401 {"msg": "Unauthorized", "error": ...}`。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use keygate_errors::AppError;
use serde::Serialize;
use tracing::error;

use crate::error::AuthError;

#[derive(Debug)]
pub enum ApiError {
    Auth(AuthError),
    /// 请求体无法解析
    BadRequest(String),
    /// Authorization 头缺失或格式错误
    Unauthorized(String),
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        Self::Auth(err)
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub msg: String,
    pub error: String,
}

fn unauthorized(detail: String) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(ErrorResponse {
            msg: "Unauthorized".to_string(),
            error: detail,
        }),
    )
        .into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Auth(err) if err.is_token_failure() => unauthorized(err.to_string()),
            ApiError::Unauthorized(detail) => unauthorized(detail),
            ApiError::BadRequest(detail) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    msg: "Invalid request body".to_string(),
                    error: detail,
                }),
            )
                .into_response(),
            ApiError::Auth(err) => {
                let app_error = AppError::from(err);
                let status = StatusCode::from_u16(app_error.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

                let msg = match &app_error {
                    AppError::Internal(detail) => {
                        error!(error = %detail, "Request failed");
                        "Internal server error".to_string()
                    }
                    other => other.detail().to_string(),
                };

                (status, Json(MessageResponse::new(msg))).into_response()
            }
        }
    }
}
