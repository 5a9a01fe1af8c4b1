//! HTTP 路由

mod error;
mod extract;
mod handlers;

pub use error::*;
pub use extract::*;
pub use handlers::*;

use axum::{
    Router,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::application::AuthService;

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    pub fn new(auth: AuthService) -> Self {
        Self {
            auth,
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/signin", post(signin))
        .route("/protected", get(protected))
        .route("/revoke", post(revoke))
        .route("/refresh", post(refresh))
        .route("/health", get(health_check))
        .route("/metrics", get(render_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
