//! Prometheus 指标模块
//!
//! 基于 metrics crate 和 metrics-exporter-prometheus 实现指标收集与导出。
//! 指标通过独立的 HTTP 端口暴露，供 Prometheus 抓取。

use anyhow::Result;
use axum::{Router, routing::get};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::net::SocketAddr;
use std::sync::OnceLock;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::config::ObservabilityConfig;

/// 全局 Prometheus handle，用于渲染指标
static PROMETHEUS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics 资源守卫
pub struct MetricsHandle {
    _server_handle: tokio::task::JoinHandle<()>,
}

/// 初始化 Prometheus 指标导出
///
/// 启动一个独立的 HTTP 服务器在指定端口暴露 `/metrics` 端点。
pub async fn init(config: &ObservabilityConfig) -> Result<MetricsHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    let _ = PROMETHEUS_HANDLE.set(handle.clone());

    register_common_metrics(&config.service_name);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.metrics_port));
    let server_handle = start_metrics_server(addr, handle).await?;

    Ok(MetricsHandle {
        _server_handle: server_handle,
    })
}

/// 注册通用指标
fn register_common_metrics(service_name: &str) {
    metrics::describe_counter!("http_requests_total", "Total number of HTTP requests");
    metrics::describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );

    metrics::describe_counter!(
        "designs_generated_total",
        "Total number of design generation attempts"
    );
    metrics::describe_histogram!(
        "design_generation_duration_seconds",
        "Design generation duration in seconds"
    );
    metrics::describe_counter!(
        "generation_quota_rejections_total",
        "Generation requests rejected by the daily quota"
    );
    metrics::describe_counter!("designs_saved_total", "Total number of saved designs");
    metrics::describe_counter!("orders_placed_total", "Total number of placed orders");
    metrics::describe_counter!(
        "external_call_failures_total",
        "Failed calls to external providers"
    );

    metrics::counter!("service_starts_total", "service" => service_name.to_string()).increment(1);
}

async fn start_metrics_server(
    addr: SocketAddr,
    handle: PrometheusHandle,
) -> Result<tokio::task::JoinHandle<()>> {
    let app = Router::new()
        .route("/metrics", get(move || std::future::ready(handle.render())))
        .route("/health", get(|| async { "OK" }));

    let listener = TcpListener::bind(addr).await?;
    info!("Metrics server listening on {}", addr);

    let server_handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            error!("Metrics server error: {}", e);
        }
    });

    Ok(server_handle)
}

/// 获取全局 Prometheus handle（用于自定义渲染）
pub fn get_handle() -> Option<&'static PrometheusHandle> {
    PROMETHEUS_HANDLE.get()
}

// ============================================================================
// 指标记录函数
// ============================================================================

/// 记录 HTTP 请求
#[inline]
pub fn record_http_request(method: &str, path: &str, status: u16, duration_secs: f64) {
    let status_str = status.to_string();
    metrics::counter!(
        "http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str.clone()
    )
    .increment(1);

    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status_str
    )
    .record(duration_secs);
}

/// 记录一次设计生成
#[inline]
pub fn record_design_generation(status: &str, duration_secs: f64) {
    metrics::counter!("designs_generated_total", "status" => status.to_string()).increment(1);
    metrics::histogram!("design_generation_duration_seconds").record(duration_secs);
}

/// 记录配额拒绝
#[inline]
pub fn record_quota_rejection() {
    metrics::counter!("generation_quota_rejections_total").increment(1);
}

/// 记录设计保存
#[inline]
pub fn record_design_saved(status: &str) {
    metrics::counter!("designs_saved_total", "status" => status.to_string()).increment(1);
}

/// 记录下单
#[inline]
pub fn record_order_placed(size: &str) {
    metrics::counter!("orders_placed_total", "size" => size.to_string()).increment(1);
}

/// 记录外部服务调用失败
#[inline]
pub fn record_external_failure(service: &str, operation: &str) {
    metrics::counter!(
        "external_call_failures_total",
        "service" => service.to_string(),
        "operation" => operation.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_functions_do_not_panic() {
        // 即使没有初始化 recorder，这些函数也不应该 panic
        record_http_request("GET", "/api/designs", 200, 0.1);
        record_design_generation("success", 2.5);
        record_quota_rejection();
        record_design_saved("success");
        record_order_placed("M");
        record_external_failure("gemini", "generate");
    }
}
