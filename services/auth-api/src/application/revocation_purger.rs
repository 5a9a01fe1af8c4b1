//! 吊销表后台清理任务

use std::time::Duration;

use keygate_bootstrap::ShutdownController;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::application::AuthService;

/// 周期性清理已过期的吊销记录，收到关闭信号后退出
pub fn spawn_revocation_purger(
    service: AuthService,
    interval: Duration,
    shutdown: ShutdownController,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        let stopped = shutdown.wait();
        tokio::pin!(stopped);

        loop {
            tokio::select! {
                _ = &mut stopped => break,
                _ = ticker.tick() => {
                    let purged = service.purge_revocations();
                    if purged > 0 {
                        debug!(purged, remaining = service.revocations().len(), "Purged expired revocations");
                    }
                }
            }
        }

        info!("Revocation purger stopped");
    })
}
