//! Graceful Shutdown

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Shutdown 控制器
///
/// 关闭状态是持久的：触发之后再调用 `wait` 也会立即返回。
#[derive(Clone)]
pub struct ShutdownController {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        info!("Triggering shutdown");
        self.tx.send_replace(true);
    }

    /// 等待关闭信号
    pub fn wait(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            // Sender 随控制器一同存活，wait_for 只会因关闭而返回
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
