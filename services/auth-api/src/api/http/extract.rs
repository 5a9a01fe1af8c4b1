//! 请求提取器

use axum::{
    Json,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts},
};
use keygate_common::Identity;
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::{ApiError, AppState};

const BEARER: &str = "Bearer";

/// signup / signin 请求体，字段缺失由服务层判断
#[derive(Deserialize, Default)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<Secret<String>>,
}

impl CredentialsRequest {
    pub fn email(&self) -> &str {
        self.email.as_deref().unwrap_or_default()
    }

    pub fn password(&self) -> &str {
        self.password
            .as_ref()
            .map(|p| p.expose_secret().as_str())
            .unwrap_or_default()
    }
}

/// JSON 凭据提取器，解析失败返回 400
pub struct CredentialsBody(pub CredentialsRequest);

impl<S> FromRequest<S> for CredentialsBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<CredentialsRequest>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(payload))
    }
}

/// `Authorization: Bearer <token>` 中的原始令牌
pub struct BearerToken(pub String);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| ApiError::Unauthorized("Missing Authorization Header".to_string()))?;

        let bad_header = || {
            ApiError::Unauthorized(
                "Bad Authorization header. Expected 'Authorization: Bearer <JWT>'".to_string(),
            )
        };

        let value = header.to_str().map_err(|_| bad_header())?;
        match value.split_once(' ') {
            Some((BEARER, token)) if !token.trim().is_empty() => {
                Ok(Self(token.trim().to_string()))
            }
            _ => Err(bad_header()),
        }
    }
}

/// 已通过令牌校验的调用方
///
/// 受保护的处理函数声明此提取器即完成鉴权，校验失败直接短路为 401。
pub struct AuthenticatedUser {
    pub identity: Identity,
}

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let app_state = AppState::from_ref(state);
        let identity = app_state.auth.authenticate(&token)?;
        Ok(Self { identity })
    }
}
