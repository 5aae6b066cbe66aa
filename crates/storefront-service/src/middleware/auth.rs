//! 认证中间件
//!
//! 校验请求中的 Bearer Token 并将用户信息注入请求扩展

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
    typed_header::TypedHeaderRejection,
};
use tracing::debug;

use crate::error::{ShopError, action};
use crate::state::AppState;

/// 认证中间件
///
/// 只挂在需要登录的路由上。缺少 token 或 token 无效返回 401，
/// 认证服务不可用返回 500；通过后将 [`AuthUser`](crate::auth::AuthUser) 注入请求扩展。
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Result<TypedHeader<Authorization<Bearer>>, TypedHeaderRejection>,
    mut request: Request,
    next: Next,
) -> Response {
    let Ok(TypedHeader(Authorization(bearer))) = bearer else {
        debug!("Missing or malformed Authorization header");
        return ShopError::Unauthorized.into_response();
    };

    match state.authenticator.authenticate(bearer.token()).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        Ok(None) => ShopError::Unauthorized.into_response(),
        Err(e) => ShopError::upstream(action::VERIFY_SESSION)(e).into_response(),
    }
}
