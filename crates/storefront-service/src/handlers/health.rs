//! 健康检查

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};

use crate::state::AppState;

const SERVICE_NAME: &str = "storefront-service";

/// 存活探针：服务进程正常即返回 ok
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME
    }))
}

/// 就绪探针：必需的配置项都已设置
///
/// GET /ready
pub async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    if state.missing_settings.is_empty() {
        (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "service": SERVICE_NAME
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "not_ready",
                "service": SERVICE_NAME,
                "missing": state.missing_settings.as_slice()
            })),
        )
    }
}
