//! 本地校验 Supabase access token
//!
//! Supabase 签发的 access token 使用项目 JWT 密钥做 HS256 签名，
//! 登录用户的 `aud` 为 `authenticated`。

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};
use tracing::debug;
use vision_shared::error::ExternalError;

use super::{AuthUser, Authenticator};

const AUDIENCE: &str = "authenticated";

/// Supabase access token 载荷中本服务关心的字段
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SupabaseClaims {
    /// 用户 ID
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub aud: String,
    /// 过期时间
    pub exp: i64,
}

/// JWT 校验器
#[derive(Clone)]
pub struct JwtAuthenticator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtAuthenticator {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[AUDIENCE]);

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// 校验并解析 token，签名错误、过期或受众不符都返回 `None`
    pub fn verify(&self, token: &str) -> Option<SupabaseClaims> {
        match decode::<SupabaseClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                debug!(reason = ?e.kind(), "Access token rejected");
                None
            }
        }
    }
}

#[async_trait]
impl Authenticator for JwtAuthenticator {
    async fn authenticate(&self, token: &str) -> Result<Option<AuthUser>, ExternalError> {
        Ok(self.verify(token).map(|claims| AuthUser {
            id: claims.sub,
            email: claims.email,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use jsonwebtoken::{EncodingKey, Header, encode};

    const SECRET: &str = "super-secret-jwt-token-with-at-least-32-characters";

    fn token(secret: &str, aud: &str, exp_offset_secs: i64) -> String {
        let claims = SupabaseClaims {
            sub: "6f1c2b9e-0000-4000-8000-000000000001".to_string(),
            email: Some("maker@example.com".to_string()),
            aud: aud.to_string(),
            exp: Utc::now().timestamp() + exp_offset_secs,
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_valid_token() {
        let auth = JwtAuthenticator::new(SECRET);
        let user = auth
            .authenticate(&token(SECRET, AUDIENCE, 3600))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.id, "6f1c2b9e-0000-4000-8000-000000000001");
        assert_eq!(user.email.as_deref(), Some("maker@example.com"));
    }

    #[test]
    fn test_rejected_tokens() {
        let auth = JwtAuthenticator::new(SECRET);
        assert!(auth.verify(&token("another-secret", AUDIENCE, 3600)).is_none());
        assert!(auth.verify(&token(SECRET, AUDIENCE, -3600)).is_none());
        assert!(auth.verify(&token(SECRET, "anon", 3600)).is_none());
        assert!(auth.verify("invalid.token.here").is_none());
    }
}
