//! 路由配置模块
//!
//! 定义所有 REST API 端点的路由映射

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::{handlers, middleware::require_auth, state::AppState};

/// 公开路由（无需登录）
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/enhance-prompt", post(handlers::generation::enhance_prompt))
        .route("/suggest-name", post(handlers::generation::suggest_name))
        .route("/designs", get(handlers::design::list_designs))
        .route("/designs/{id}", get(handlers::design::get_design))
        .route("/catalog/size-guide", get(handlers::catalog::size_guide))
        .route("/catalog/colors", get(handlers::catalog::colors))
        .route("/catalog/sizes", get(handlers::catalog::sizes))
}

/// 需要登录的路由
///
/// 使用 `route_layer`，未匹配的路径直接 404，不经过认证。
fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/generate", post(handlers::generation::generate))
        .route(
            "/generations/quota",
            get(handlers::generation::quota_status),
        )
        .route("/save-design", post(handlers::design::save_design))
        .route("/create-order", post(handlers::order::create_order))
        .route_layer(middleware::from_fn_with_state(state, require_auth))
}

/// `/api` 下的全部路由
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes(state))
}

/// 完整应用路由（不含 CORS、超时、追踪等外层中间件）
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes(state.clone()))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .with_state(state)
}
