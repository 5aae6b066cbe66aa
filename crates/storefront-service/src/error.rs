//! 店铺服务错误类型定义
//!
//! 请求参数错误、认证错误、配额错误和外部服务错误统一映射为 HTTP 响应。

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use vision_shared::error::ExternalError;
use vision_shared::observability::metrics;

use crate::dto::ApiResponse;

/// 外部调用失败时返回给客户端的提示
///
/// 外部服务的原始错误只写日志，客户端只看到操作级别的提示。
pub mod action {
    pub const GENERATE_DESIGN: &str = "Failed to generate design";
    pub const ENHANCE_PROMPT: &str = "Failed to enhance prompt";
    pub const SUGGEST_NAME: &str = "Failed to suggest name";
    pub const UPLOAD_IMAGE: &str = "Failed to upload image";
    pub const SAVE_DESIGN: &str = "Failed to save design record";
    pub const CREATE_ORDER: &str = "Failed to create order";
    pub const LOAD_DESIGNS: &str = "Failed to load designs";
    pub const CHECK_QUOTA: &str = "Failed to check generation quota";
    pub const VERIFY_SESSION: &str = "Failed to verify session";
}

/// 店铺服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ShopError {
    // 请求错误
    #[error("{0}")]
    MissingFields(String),
    #[error("{0}")]
    Validation(String),
    #[error("Invalid image data: {0}")]
    InvalidImage(String),
    #[error("Invalid JSON body: {0}")]
    InvalidJson(String),

    // 认证错误
    #[error("Unauthorized")]
    Unauthorized,

    // 资源不存在
    #[error("Design not found: {0}")]
    DesignNotFound(String),

    // 配额
    #[error("Daily generation limit reached ({limit} per day). Try again tomorrow.")]
    QuotaExceeded { limit: u32 },

    // 系统错误
    #[error("{action}")]
    Upstream {
        action: &'static str,
        #[source]
        source: ExternalError,
    },
}

impl ShopError {
    /// 构造一个把外部错误包装为指定操作失败的转换函数，配合 `map_err` 使用
    pub fn upstream(action: &'static str) -> impl FnOnce(ExternalError) -> Self {
        move |source| Self::Upstream { action, source }
    }

    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::MissingFields(_)
            | Self::Validation(_)
            | Self::InvalidImage(_)
            | Self::InvalidJson(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::DesignNotFound(_) => StatusCode::NOT_FOUND,
            Self::QuotaExceeded { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（用于 API 响应）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFields(_) => "MISSING_FIELDS",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidImage(_) => "INVALID_IMAGE",
            Self::InvalidJson(_) => "INVALID_JSON",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::DesignNotFound(_) => "DESIGN_NOT_FOUND",
            Self::QuotaExceeded { .. } => "QUOTA_EXCEEDED",
            Self::Upstream { .. } => "UPSTREAM_ERROR",
        }
    }
}

impl IntoResponse for ShopError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志
        let message = match &self {
            Self::Upstream { action, source } => {
                tracing::error!(
                    action = %action,
                    service = source.service(),
                    code = source.code(),
                    error = %source,
                    "外部服务调用失败"
                );
                metrics::record_external_failure(source.service(), action);
                action.to_string()
            }
            other => other.to_string(),
        };

        let body = ApiResponse::<()>::error(self.error_code(), &message);
        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ShopError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 请求体不是合法 JSON 或字段类型不匹配
impl From<JsonRejection> for ShopError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidJson(rejection.body_text())
    }
}

/// 查询参数无法解析
impl From<QueryRejection> for ShopError {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn upstream_error() -> ShopError {
        ShopError::Upstream {
            action: action::GENERATE_DESIGN,
            source: ExternalError::Status {
                service: "gemini",
                status: 503,
                message: "model overloaded, key AIza-secret".to_string(),
            },
        }
    }

    /// 构造所有错误变体及其期望的 (StatusCode, error_code) 映射
    fn all_error_variants() -> Vec<(ShopError, StatusCode, &'static str)> {
        vec![
            (ShopError::MissingFields("Prompt is required".into()), StatusCode::BAD_REQUEST, "MISSING_FIELDS"),
            (ShopError::Validation("size".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (ShopError::InvalidImage("not base64".into()), StatusCode::BAD_REQUEST, "INVALID_IMAGE"),
            (ShopError::InvalidJson("EOF".into()), StatusCode::BAD_REQUEST, "INVALID_JSON"),
            (ShopError::Unauthorized, StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            (ShopError::DesignNotFound("42".into()), StatusCode::NOT_FOUND, "DESIGN_NOT_FOUND"),
            (ShopError::QuotaExceeded { limit: 10 }, StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED"),
            (upstream_error(), StatusCode::INTERNAL_SERVER_ERROR, "UPSTREAM_ERROR"),
        ]
    }

    #[test]
    fn test_all_variants_status_code() {
        for (error, expected_status, label) in all_error_variants() {
            assert_eq!(
                error.status_code(),
                expected_status,
                "状态码不匹配: variant={label}"
            );
        }
    }

    #[test]
    fn test_all_variants_error_code() {
        for (error, _status, expected_code) in all_error_variants() {
            assert_eq!(error.error_code(), expected_code);
        }
    }

    #[test]
    fn test_quota_message_mentions_limit() {
        let msg = ShopError::QuotaExceeded { limit: 3 }.to_string();
        assert!(msg.contains("3 per day"));
    }

    #[tokio::test]
    async fn test_into_response_body_structure() {
        for (error, expected_status, expected_code) in all_error_variants() {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);

            let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
                .await
                .expect("读取响应体失败");
            let body: serde_json::Value =
                serde_json::from_slice(&body_bytes).expect("响应体不是合法 JSON");

            assert_eq!(body["success"], false);
            assert_eq!(body["code"], expected_code);
            assert!(body["message"].is_string());
            assert_eq!(body.get("data"), Some(&serde_json::Value::Null));
        }
    }

    /// 外部服务的原始错误不能出现在响应中
    #[tokio::test]
    async fn test_upstream_detail_is_not_leaked() {
        let response = upstream_error().into_response();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

        assert_eq!(body["message"], "Failed to generate design");
        assert!(!body.to_string().contains("AIza-secret"));
    }

    #[test]
    fn test_upstream_helper() {
        let err = ShopError::upstream(action::CREATE_ORDER)(ExternalError::EmptyResponse {
            service: "postgrest",
        });
        assert_eq!(err.to_string(), "Failed to create order");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
