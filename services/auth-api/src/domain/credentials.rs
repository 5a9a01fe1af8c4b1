//! 注册/登录输入

use keygate_common::Identity;
use secrecy::Secret;

use crate::error::AuthError;

/// 经过必填校验的凭据
#[derive(Debug)]
pub struct Credentials {
    pub email: Identity,
    pub password: Secret<String>,
}

impl Credentials {
    /// 两个字段都必须非空
    pub fn new(email: &str, password: &str) -> Result<Self, AuthError> {
        if email.is_empty() || password.is_empty() {
            return Err(AuthError::MissingField);
        }

        Ok(Self {
            email: Identity::new(email),
            password: Secret::new(password.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_requires_both_fields() {
        assert_eq!(Credentials::new("", "pw").unwrap_err(), AuthError::MissingField);
        assert_eq!(
            Credentials::new("a@example.com", "").unwrap_err(),
            AuthError::MissingField
        );

        let credentials = Credentials::new("a@example.com", "pw").unwrap();
        assert_eq!(credentials.email.as_str(), "a@example.com");
        assert_eq!(credentials.password.expose_secret(), "pw");
    }

    #[test]
    fn test_debug_hides_password() {
        let credentials = Credentials::new("a@example.com", "hunter2").unwrap();
        assert!(!format!("{:?}", credentials).contains("hunter2"));
    }
}
