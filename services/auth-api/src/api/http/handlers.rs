//! 路由处理函数

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use super::{ApiError, AppState, AuthenticatedUser, BearerToken, CredentialsBody, MessageResponse};
use crate::error::AuthError;

#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Argon2 计算放到阻塞线程池，避免占用异步工作线程
async fn run_blocking<T, F>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, AuthError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| AuthError::Internal(format!("Blocking task failed: {}", e)))?
        .map_err(ApiError::from)
}

pub async fn signup(
    State(state): State<AppState>,
    CredentialsBody(req): CredentialsBody,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let auth = state.auth.clone();
    run_blocking(move || auth.signup(req.email(), req.password())).await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("User created successfully")),
    ))
}

pub async fn signin(
    State(state): State<AppState>,
    CredentialsBody(req): CredentialsBody,
) -> Result<Json<TokenResponse>, ApiError> {
    let auth = state.auth.clone();
    let access_token = run_blocking(move || auth.signin(req.email(), req.password())).await?;

    Ok(Json(TokenResponse { access_token }))
}

pub async fn protected(user: AuthenticatedUser) -> Json<MessageResponse> {
    Json(MessageResponse::new(format!("Hello, {}!", user.identity)))
}

pub async fn revoke(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<MessageResponse>, ApiError> {
    state.auth.revoke_current(&token)?;
    Ok(Json(MessageResponse::new("Token revoked")))
}

pub async fn refresh(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
) -> Result<Json<TokenResponse>, ApiError> {
    let access_token = state.auth.refresh(&token)?;
    Ok(Json(TokenResponse { access_token }))
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn render_metrics(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}
