//! 认证模块
//!
//! 用户会话由 Supabase 管理，本服务只负责校验请求携带的 access token。
//! 校验方式由 `supabase.auth_mode` 决定：
//!
//! - `remote`: 每个请求调用 Supabase 查询当前用户
//! - `jwt`: 使用项目 JWT 密钥在本地校验签名

mod jwt;
mod remote;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use vision_shared::error::ExternalError;

pub use jwt::{JwtAuthenticator, SupabaseClaims};
pub use remote::SupabaseAuthenticator;

/// 已认证用户，由认证中间件注入请求扩展
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
}

/// access token 校验
///
/// token 无效返回 `Ok(None)`；只有校验服务本身不可用时才返回错误。
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn authenticate(&self, token: &str) -> Result<Option<AuthUser>, ExternalError>;
}
