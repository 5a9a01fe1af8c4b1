//! 内存凭据存储
//!
//! email → 密码哈希。注册与校验都在锁外做 Argon2 计算，
//! 锁内只做查找或“检查不存在再插入”。

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{PoisonError, RwLock};

use keygate_common::Identity;
use once_cell::sync::Lazy;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::{HashedPassword, PasswordHashError};

/// 未知账户时用于校验的占位哈希，让两种失败路径耗时一致
static DUMMY_HASH: Lazy<Option<HashedPassword>> =
    Lazy::new(|| HashedPassword::from_plain("keygate-timing-equalizer").ok());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CredentialError {
    #[error("User already exists")]
    AlreadyExists,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
}

/// 凭据存储
#[derive(Default)]
pub struct CredentialStore {
    users: RwLock<HashMap<Identity, HashedPassword>>,
}

impl CredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册账户；同一 email 并发注册时只有一个成功
    pub fn register(&self, email: &Identity, password: &str) -> Result<(), CredentialError> {
        if self.contains(email) {
            return Err(CredentialError::AlreadyExists);
        }

        let hash = HashedPassword::from_plain(password)?;

        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        match users.entry(email.clone()) {
            Entry::Occupied(_) => Err(CredentialError::AlreadyExists),
            Entry::Vacant(slot) => {
                slot.insert(hash);
                debug!(email = %email, "Credential stored");
                Ok(())
            }
        }
    }

    /// 校验密码；账户不存在与密码错误返回同一错误
    pub fn verify(&self, email: &Identity, password: &str) -> Result<(), CredentialError> {
        let stored = self
            .users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(email)
            .cloned();

        match stored {
            Some(hash) => {
                if hash.verify(password)? {
                    Ok(())
                } else {
                    Err(CredentialError::InvalidCredentials)
                }
            }
            None => {
                match DUMMY_HASH.as_ref() {
                    Some(dummy) => {
                        let _ = dummy.verify(password);
                    }
                    None => warn!("Timing equalizer hash unavailable"),
                }
                Err(CredentialError::InvalidCredentials)
            }
        }
    }

    pub fn contains(&self, email: &Identity) -> bool {
        self.users
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(email)
    }

    pub fn len(&self) -> usize {
        self.users.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
