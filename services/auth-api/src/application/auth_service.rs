//! 认证服务
//!
//! 组合凭据存储、令牌编解码与吊销表。所有受保护操作都先经过 `gate`：
//! 验签 → 过期 → 吊销，且每次调用都实时查询吊销表。

use std::sync::Arc;

use chrono::Duration;
use keygate_auth_core::{TokenClaims, TokenCodec, TokenError};
use keygate_common::{Clock, Identity, SystemClock};
use keygate_config::AppConfig;
use metrics::{counter, gauge};
use secrecy::ExposeSecret;
use tracing::{info, warn};

use crate::domain::Credentials;
use crate::error::AuthError;
use crate::infrastructure::{CredentialError, CredentialStore, RevocationRegistry};

/// 默认访问令牌有效期（秒）
pub const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::AlreadyExists => AuthError::AlreadyExists,
            CredentialError::InvalidCredentials => AuthError::InvalidCredentials,
            CredentialError::Hashing(e) => AuthError::Internal(e.to_string()),
        }
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Invalid(detail) => AuthError::InvalidToken(detail),
            TokenError::Encoding(msg) => AuthError::Internal(msg),
        }
    }
}

#[derive(Clone)]
pub struct AuthService {
    credentials: Arc<CredentialStore>,
    codec: TokenCodec,
    revocations: Arc<RevocationRegistry>,
    clock: Arc<dyn Clock>,
    access_token_ttl: Duration,
}

impl AuthService {
    pub fn new(
        credentials: Arc<CredentialStore>,
        codec: TokenCodec,
        revocations: Arc<RevocationRegistry>,
        clock: Arc<dyn Clock>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            credentials,
            codec,
            revocations,
            clock,
            access_token_ttl,
        }
    }

    /// 按配置组装，使用系统时钟与空存储
    pub fn from_config(config: &AppConfig) -> Result<Self, AuthError> {
        let codec = TokenCodec::new(
            config.jwt.secret.expose_secret().as_bytes(),
            config.jwt.issuer.clone(),
        );
        let ttl = Duration::from_std(config.jwt.access_token_ttl())
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {}", e)))?;

        Ok(Self::new(
            Arc::new(CredentialStore::new()),
            codec,
            Arc::new(RevocationRegistry::new()),
            Arc::new(SystemClock),
            ttl,
        ))
    }

    pub fn access_token_ttl(&self) -> Duration {
        self.access_token_ttl
    }

    pub fn revocations(&self) -> &RevocationRegistry {
        &self.revocations
    }

    /// 注册
    pub fn signup(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let result = Credentials::new(email, password).and_then(|credentials| {
            self.credentials
                .register(&credentials.email, credentials.password.expose_secret())
                .map_err(AuthError::from)
        });

        match &result {
            Ok(()) => {
                counter!("auth_signup_total", "result" => "created").increment(1);
                info!(email = %email, "User registered");
            }
            Err(AuthError::AlreadyExists) => {
                counter!("auth_signup_total", "result" => "conflict").increment(1);
                warn!(email = %email, "Signup rejected: user already exists");
            }
            Err(e) => {
                counter!("auth_signup_total", "result" => "rejected").increment(1);
                warn!(error = %e, "Signup rejected");
            }
        }

        result
    }

    /// 登录并签发访问令牌
    ///
    /// 未知账户、密码错误与字段缺失统一返回 `InvalidCredentials`。
    pub fn signin(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let identity = Identity::new(email);
        let verified = if email.is_empty() || password.is_empty() {
            Err(AuthError::InvalidCredentials)
        } else {
            self.credentials
                .verify(&identity, password)
                .map_err(AuthError::from)
        };

        if let Err(e) = verified {
            counter!("auth_signin_total", "result" => "failure").increment(1);
            warn!(email = %email, "Signin failed");
            return Err(e);
        }

        let token = self.issue(&identity)?;
        counter!("auth_signin_total", "result" => "success").increment(1);
        info!(email = %email, "User signed in");
        Ok(token)
    }

    /// 校验令牌并返回其身份
    pub fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.gate(token).map(|claims| claims.subject())
    }

    /// 吊销当前令牌
    pub fn revoke_current(&self, token: &str) -> Result<(), AuthError> {
        let claims = self.gate(token)?;

        if self.revocations.revoke(claims.token_id(), claims.expires_at()) {
            counter!("auth_tokens_revoked_total").increment(1);
        }
        gauge!("auth_revocations_active").set(self.revocations.len() as f64);

        info!(email = %claims.sub, jti = %claims.jti, "Token revoked");
        Ok(())
    }

    /// 用有效令牌换取新令牌
    ///
    /// 旧令牌不会被吊销，在自身过期前仍然可用。
    pub fn refresh(&self, token: &str) -> Result<String, AuthError> {
        let claims = self.gate(token)?;
        let token = self.issue(&claims.subject())?;

        info!(email = %claims.sub, previous_jti = %claims.jti, "Token refreshed");
        Ok(token)
    }

    /// 清理已自然过期的吊销记录
    pub fn purge_revocations(&self) -> usize {
        let purged = self.revocations.purge_expired(self.clock.now());
        gauge!("auth_revocations_active").set(self.revocations.len() as f64);
        purged
    }

    fn issue(&self, identity: &Identity) -> Result<String, AuthError> {
        let issued = self
            .codec
            .issue(identity, self.clock.now(), self.access_token_ttl)?;
        counter!("auth_tokens_issued_total").increment(1);
        Ok(issued.token)
    }

    fn gate(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let result = self.check(token);

        let outcome = match &result {
            Ok(_) => "active",
            Err(AuthError::Expired) => "expired",
            Err(AuthError::Revoked) => "revoked",
            Err(_) => "invalid",
        };
        counter!("auth_authenticate_total", "result" => outcome).increment(1);

        if let Err(e) = &result {
            warn!(error = %e, "Token rejected");
        }

        result
    }

    fn check(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let claims = self.codec.parse(token)?;

        if claims.is_expired_at(self.clock.now()) {
            return Err(AuthError::Expired);
        }

        if self.revocations.is_revoked(claims.token_id()) {
            return Err(AuthError::Revoked);
        }

        Ok(claims)
    }
}
