//! Supabase 客户端
//!
//! 对托管后端的三类能力做最薄的一层封装：
//!
//! - `auth`: 根据 access token 查询当前用户（GoTrue）
//! - `postgrest`: 表的 insert / select / count（PostgREST）
//! - `storage`: 对象上传与公开访问地址（Storage）
//!
//! 服务端写操作统一使用 service role key；用户查询使用 anon key 加用户自己的 token。

pub mod auth;
pub mod postgrest;
pub mod storage;

use reqwest::RequestBuilder;
use tracing::info;

use crate::config::SupabaseConfig;
use crate::error::{ExternalError, Result};

pub use auth::SupabaseUser;
pub use postgrest::Query;

/// Supabase HTTP 客户端
///
/// 内部的 `reqwest::Client` 自带连接池，克隆开销很小。
#[derive(Clone)]
pub struct SupabaseClient {
    http: reqwest::Client,
    base_url: String,
    anon_key: String,
    service_role_key: String,
}

impl SupabaseClient {
    /// 创建客户端
    pub fn new(config: &SupabaseConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExternalError::transport("supabase", e))?;

        info!(url = %config.url, "Supabase client created");

        Ok(Self::with_http(
            http,
            &config.url,
            &config.anon_key,
            &config.service_role_key,
        ))
    }

    /// 使用已有的 HTTP 客户端创建
    pub fn with_http(
        http: reqwest::Client,
        base_url: &str,
        anon_key: &str,
        service_role_key: &str,
    ) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
            service_role_key: service_role_key.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// 以 service role 身份发起请求
    fn as_service(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.service_role_key)
            .bearer_auth(&self.service_role_key)
    }

    /// 以终端用户身份发起请求
    fn as_user(&self, builder: RequestBuilder, access_token: &str) -> RequestBuilder {
        builder
            .header("apikey", &self.anon_key)
            .bearer_auth(access_token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = SupabaseClient::with_http(
            reqwest::Client::new(),
            "https://demo.supabase.co/",
            "anon",
            "service",
        );
        assert_eq!(
            client.endpoint("/rest/v1/designs"),
            "https://demo.supabase.co/rest/v1/designs"
        );
        assert_eq!(
            client.endpoint("auth/v1/user"),
            "https://demo.supabase.co/auth/v1/user"
        );
    }
}
