//! JWT Claims

use chrono::{DateTime, Utc};
use keygate_common::Identity;
use serde::{Deserialize, Serialize};

/// 访问令牌类型标记
pub const ACCESS_TOKEN_TYPE: &str = "access";

/// JWT Claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (email)
    pub sub: String,
    /// JWT ID，吊销时使用的键
    pub jti: String,
    /// Issued at
    pub iat: i64,
    /// Expiration time
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// Token type
    pub token_type: String,
}

impl TokenClaims {
    pub fn subject(&self) -> Identity {
        Identity::new(self.sub.clone())
    }

    pub fn token_id(&self) -> &str {
        &self.jti
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.iat, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    /// 超出可表示范围时视为早已过期
    pub fn expires_at(&self) -> DateTime<Utc> {
        DateTime::from_timestamp(self.exp, 0).unwrap_or(DateTime::<Utc>::MIN_UTC)
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_access_token(&self) -> bool {
        self.token_type == ACCESS_TOKEN_TYPE
    }
}
