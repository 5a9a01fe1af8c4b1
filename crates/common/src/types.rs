//! 通用类型定义

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};

/// 账户身份（注册时使用的邮箱）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[display("{_0}")]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub fn new(email: impl Into<String>) -> Self {
        Self(email.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
