//! AI 设计 T 恤商城后端服务
//!
//! 提供设计生成、作品保存、下单等 REST API。

use std::time::Duration;

use axum::{http::HeaderValue, middleware};
use storefront_service::{middleware::security_headers, routes, state::AppState};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
};
use tracing::{info, warn};
use vision_shared::{
    config::{AppConfig, CorsConfig},
    observability::{self, middleware as obs_middleware},
};

const SERVICE_NAME: &str = "storefront-service";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 从 config/{service_name}.toml 和 VISION_ 环境变量加载，无法解析时直接退出
    let config = AppConfig::load(SERVICE_NAME)
        .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?;

    let obs_config = config.observability.clone().with_service_name(SERVICE_NAME);
    let _guard = observability::init(&obs_config).await?;

    info!("Starting {} on {}", SERVICE_NAME, config.server_addr());

    let missing = config.missing_settings();
    if !missing.is_empty() {
        // 缺少密钥时仍然启动，/ready 返回 503，相关接口调用外部服务时失败
        warn!(missing = ?missing, "Required settings are not configured");
    }

    let state = AppState::from_config(&config)?;

    let app = routes::app(state)
        .layer(middleware::from_fn(security_headers))
        .layer(cors_layer(&config.cors, config.is_production()))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        // 可观测性中间件：请求追踪和指标收集
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id));

    let listener = TcpListener::bind(config.server_addr()).await?;
    info!("Listening on {}", config.server_addr());

    // 收到 SIGTERM 或 Ctrl+C 后停止接收新连接，等待已有请求处理完毕
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");

    Ok(())
}

/// 按配置构造 CORS 层，`*` 表示允许所有来源
fn cors_layer(cors: &CorsConfig, production: bool) -> CorsLayer {
    if cors.allows_any() {
        if production {
            warn!("cors.allowed_origins=\"*\" 在生产环境中不安全，请设置为具体域名");
        }
        info!("CORS allowed_origins: * (all origins)");
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    info!("CORS allowed_origins: {}", cors.allowed_origins);
    let origins: Vec<HeaderValue> = cors
        .origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 监听关闭信号
///
/// 容器平台通过 SIGTERM 通知停止；本地开发通过 Ctrl+C。
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("注册 Ctrl+C 处理器失败");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("注册 SIGTERM 处理器失败")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, initiating graceful shutdown..."),
        _ = terminate => info!("Received SIGTERM, initiating graceful shutdown..."),
    }
}
