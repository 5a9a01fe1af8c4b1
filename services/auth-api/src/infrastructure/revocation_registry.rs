//! 令牌吊销表
//!
//! 记录被吊销的 jti 及其原始过期时间。条目在令牌过期后还要再保留
//! `RETENTION_GRACE_SECS`，系统时钟小幅回拨也不会让已吊销的令牌重新生效。

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Duration, Utc};

/// 过期后继续保留吊销记录的秒数
pub const RETENTION_GRACE_SECS: i64 = 60;

#[derive(Default)]
pub struct RevocationRegistry {
    revoked: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl RevocationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 吊销 jti，幂等；返回是否为首次吊销
    pub fn revoke(&self, token_id: &str, expires_at: DateTime<Utc>) -> bool {
        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        match revoked.get_mut(token_id) {
            Some(existing) => {
                // 只延长，不缩短
                if expires_at > *existing {
                    *existing = expires_at;
                }
                false
            }
            None => {
                revoked.insert(token_id.to_string(), expires_at);
                true
            }
        }
    }

    pub fn is_revoked(&self, token_id: &str) -> bool {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(token_id)
    }

    /// 清理过期超过 `RETENTION_GRACE_SECS` 的条目，返回清理数量
    pub fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let Some(cutoff) = now.checked_sub_signed(Duration::seconds(RETENTION_GRACE_SECS)) else {
            return 0;
        };

        let mut revoked = self.revoked.write().unwrap_or_else(PoisonError::into_inner);
        let before = revoked.len();
        revoked.retain(|_, expires_at| *expires_at > cutoff);
        before - revoked.len()
    }

    pub fn len(&self) -> usize {
        self.revoked
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
