//! 服务错误定义

use keygate_errors::AppError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email and password are required")]
    MissingField,

    #[error("User already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    Expired,

    #[error("Token has been revoked")]
    Revoked,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AuthError {
    /// 令牌本身不可用（签名、过期或吊销）
    pub fn is_token_failure(&self) -> bool {
        matches!(
            self,
            AuthError::InvalidToken(_) | AuthError::Expired | AuthError::Revoked
        )
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingField => AppError::validation(err.to_string()),
            AuthError::AlreadyExists => AppError::conflict(err.to_string()),
            AuthError::InvalidCredentials
            | AuthError::InvalidToken(_)
            | AuthError::Expired
            | AuthError::Revoked => AppError::unauthorized(err.to_string()),
            AuthError::Internal(msg) => AppError::internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_mapping() {
        assert_eq!(AppError::from(AuthError::MissingField).status_code(), 400);
        assert_eq!(AppError::from(AuthError::AlreadyExists).status_code(), 409);
        assert_eq!(AppError::from(AuthError::InvalidCredentials).status_code(), 401);
        assert_eq!(AppError::from(AuthError::Revoked).status_code(), 401);
        assert_eq!(
            AppError::from(AuthError::Internal("boom".into())).status_code(),
            500
        );
    }

    #[test]
    fn test_token_failures() {
        assert!(AuthError::Expired.is_token_failure());
        assert!(AuthError::Revoked.is_token_failure());
        assert!(AuthError::InvalidToken("bad".into()).is_token_failure());
        assert!(!AuthError::InvalidCredentials.is_token_failure());
    }
}
