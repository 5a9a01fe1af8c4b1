//! Auth API Service - 认证服务入口

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth_api::api::http::{AppState, router};
use auth_api::application::{AuthService, spawn_revocation_purger};
use keygate_bootstrap::{ShutdownController, init_runtime, shutdown_signal};
use keygate_config::AppConfig;
use keygate_telemetry::init_metrics;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // 加载配置
    let config = AppConfig::load("config").context("Failed to load configuration")?;

    // 初始化运行时
    init_runtime(&config);

    let metrics = init_metrics().context("Failed to install Prometheus recorder")?;
    let auth = AuthService::from_config(&config)?;

    info!(
        ttl_secs = auth.access_token_ttl().num_seconds(),
        issuer = %config.jwt.issuer,
        "Auth service initialized"
    );

    let shutdown = ShutdownController::new();
    let purger = spawn_revocation_purger(
        auth.clone(),
        Duration::from_secs(config.revocation.purge_interval_secs),
        shutdown.clone(),
    );

    let app = router(AppState::new(auth).with_metrics(metrics));

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    info!(%addr, "HTTP server starting");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let server_shutdown = shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown_signal().await;
            server_shutdown.shutdown();
        })
        .await?;

    purger.await?;
    info!("Auth service stopped");

    Ok(())
}
