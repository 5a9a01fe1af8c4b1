//! 密码值对象

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("Password hashing failed: {0}")]
pub struct PasswordHashError(String);

/// 哈希后的密码（Argon2id PHC 字符串，自带随机盐）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedPassword(String);

impl HashedPassword {
    /// 从明文密码创建哈希密码
    pub fn from_plain(password: &str) -> Result<Self, PasswordHashError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordHashError(e.to_string()))?;

        Ok(Self(hash.to_string()))
    }

    /// 验证密码，比较由 argon2 以常数时间完成
    pub fn verify(&self, password: &str) -> Result<bool, PasswordHashError> {
        let parsed_hash =
            PasswordHash::new(&self.0).map_err(|e| PasswordHashError(e.to_string()))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}
