//! Auth API Service Library
//!
//! - `domain`: 凭据输入与密码哈希
//! - `infrastructure`: 进程内凭据存储与吊销表
//! - `application`: 认证服务（signup / signin / authenticate / revoke / refresh）
//! - `api`: HTTP 边界

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
