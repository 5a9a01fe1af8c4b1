//! 令牌编解码
//!
//! `TokenCodec` 无状态：只负责签名与验签，不判断过期或吊销。

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use keygate_common::{Identity, utils::random_id};
use thiserror::Error;
use tracing::debug;

use crate::claims::{ACCESS_TOKEN_TYPE, TokenClaims};

const ALGORITHM: Algorithm = Algorithm::HS256;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("{0}")]
    Invalid(String),

    #[error("Failed to encode token: {0}")]
    Encoding(String),
}

impl TokenError {
    fn invalid(msg: impl Into<String>) -> Self {
        Self::Invalid(msg.into())
    }
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        let msg = match err.kind() {
            ErrorKind::InvalidSignature => "Signature verification failed",
            ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
                "The specified alg value is not allowed"
            }
            ErrorKind::InvalidIssuer => "Invalid issuer",
            ErrorKind::MissingRequiredClaim(_) => "Missing required claim",
            ErrorKind::Json(_) => "Invalid token claims",
            _ => "Malformed token",
        };
        Self::invalid(msg)
    }
}

/// 一次签发的结果
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub claims: TokenClaims,
    pub token: String,
}

/// Token 编解码器
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl TokenCodec {
    pub fn new(secret: &[u8], issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
        }
    }

    /// 签发访问令牌，每次生成新的 jti
    pub fn issue(
        &self,
        identity: &Identity,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| TokenError::Encoding("Token expiry out of range".to_string()))?;

        let claims = TokenClaims {
            sub: identity.as_str().to_string(),
            jti: random_id().to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.issuer.clone(),
            token_type: ACCESS_TOKEN_TYPE.to_string(),
        };

        let token = encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        debug!(jti = %claims.jti, exp = claims.exp, "Token issued");

        Ok(IssuedToken { claims, token })
    }

    /// 验证签名与结构，返回 Claims
    pub fn parse(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut validation = Validation::new(ALGORITHM);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["iss", "sub"]);
        // 过期由调用方按自己的时钟判断
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.leeway = 0;

        let claims = decode::<TokenClaims>(token, &self.decoding_key, &validation)?.claims;

        if claims.jti.is_empty() {
            return Err(TokenError::invalid("Token ID (jti) missing"));
        }

        if !claims.is_access_token() {
            return Err(TokenError::invalid("Not an access token"));
        }

        if DateTime::from_timestamp(claims.iat, 0).is_none()
            || DateTime::from_timestamp(claims.exp, 0).is_none()
        {
            return Err(TokenError::invalid("Token timestamps out of range"));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::TimeZone;
    use std::collections::HashSet;

    const SECRET: &[u8] = b"a-test-secret-that-is-long-enough-for-hs256";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, "keygate")
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_then_parse() {
        let codec = codec();
        let identity = Identity::new("alice@example.com");

        let issued = codec
            .issue(&identity, noon(), Duration::minutes(15))
            .unwrap();
        let claims = codec.parse(&issued.token).unwrap();

        assert_eq!(claims, issued.claims);
        assert_eq!(claims.subject(), identity);
        assert_eq!(claims.issued_at(), noon());
        assert_eq!(claims.expires_at(), noon() + Duration::minutes(15));
        assert_eq!(claims.iss, "keygate");
    }

    #[test]
    fn test_parse_ignores_expiry() {
        let codec = codec();
        let long_ago = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
        let issued = codec
            .issue(&Identity::new("bob@example.com"), long_ago, Duration::minutes(15))
            .unwrap();

        assert!(codec.parse(&issued.token).is_ok());
    }

    #[test]
    fn test_each_issue_has_fresh_jti() {
        let codec = codec();
        let identity = Identity::new("alice@example.com");

        let ids: HashSet<String> = (0..50)
            .map(|_| {
                codec
                    .issue(&identity, noon(), Duration::minutes(15))
                    .unwrap()
                    .claims
                    .jti
            })
            .collect();

        assert_eq!(ids.len(), 50);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = TokenCodec::new(b"another-secret-of-reasonable-length!!", "keygate")
            .issue(&Identity::new("eve@example.com"), noon(), Duration::minutes(15))
            .unwrap();

        let err = codec().parse(&issued.token).unwrap_err();
        assert_eq!(err, TokenError::Invalid("Signature verification failed".into()));
    }

    #[test]
    fn test_foreign_issuer_rejected() {
        let issued = TokenCodec::new(SECRET, "someone-else")
            .issue(&Identity::new("eve@example.com"), noon(), Duration::minutes(15))
            .unwrap();

        assert_eq!(
            codec().parse(&issued.token).unwrap_err(),
            TokenError::Invalid("Invalid issuer".into())
        );
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let claims = codec()
            .issue(&Identity::new("eve@example.com"), noon(), Duration::minutes(15))
            .unwrap()
            .claims;
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET),
        )
        .unwrap();

        assert!(matches!(codec().parse(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_unsigned_token_rejected() {
        let claims = codec()
            .issue(&Identity::new("eve@example.com"), noon(), Duration::minutes(15))
            .unwrap()
            .claims;
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&claims).unwrap());
        let token = format!("{header}.{payload}.");

        assert!(matches!(codec().parse(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_issue_with_unrepresentable_expiry_fails() {
        let result = codec().issue(
            &Identity::new("alice@example.com"),
            noon(),
            Duration::days(365 * 1_000_000),
        );

        assert!(matches!(result, Err(TokenError::Encoding(_))));
    }

    #[test]
    fn test_garbage_rejected() {
        for token in ["", "abc", "a.b", "a.b.c", "...."] {
            assert!(
                matches!(codec().parse(token), Err(TokenError::Invalid(_))),
                "accepted {token:?}"
            );
        }
    }
}
