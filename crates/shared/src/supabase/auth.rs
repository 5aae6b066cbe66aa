//! 会话用户查询

use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::SupabaseClient;
use crate::error::{ExternalError, Result, status_error};

const SERVICE: &str = "supabase-auth";

/// Supabase 认证用户
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SupabaseUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

impl SupabaseClient {
    /// 根据 access token 查询当前用户
    ///
    /// token 无效或过期时返回 `Ok(None)`，只有服务端故障才返回错误。
    pub async fn get_user(&self, access_token: &str) -> Result<Option<SupabaseUser>> {
        let response = self
            .as_user(self.http.get(self.endpoint("/auth/v1/user")), access_token)
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Access token rejected by auth service");
                Ok(None)
            }
            status if status.is_success() => {
                let user = response
                    .json::<SupabaseUser>()
                    .await
                    .map_err(|e| ExternalError::decode(SERVICE, e.to_string()))?;
                Ok(Some(user))
            }
            _ => Err(status_error(SERVICE, response).await),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_deserialization_ignores_extra_fields() {
        let body = r#"{
            "id": "6f1c2b9e-0000-4000-8000-000000000001",
            "aud": "authenticated",
            "role": "authenticated",
            "email": "maker@example.com",
            "app_metadata": {"provider": "email"}
        }"#;
        let user: SupabaseUser = serde_json::from_str(body).unwrap();
        assert_eq!(user.id, "6f1c2b9e-0000-4000-8000-000000000001");
        assert_eq!(user.email.as_deref(), Some("maker@example.com"));
    }

    #[test]
    fn test_user_without_email() {
        let user: SupabaseUser = serde_json::from_str(r#"{"id":"u-1"}"#).unwrap();
        assert!(user.email.is_none());
    }
}
