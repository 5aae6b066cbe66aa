//! 外部调用错误类型
//!
//! Supabase、Gemini 等外部服务客户端共用的错误类型，使用 thiserror 提供良好的错误信息。

use thiserror::Error;

/// 外部服务调用错误
#[derive(Debug, Error)]
pub enum ExternalError {
    /// 网络层失败：连接、超时、TLS 等
    #[error("请求 {service} 失败: {source}")]
    Transport {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// 对端返回非 2xx 状态码
    #[error("{service} 返回 {status}: {message}")]
    Status {
        service: &'static str,
        status: u16,
        message: String,
    },

    /// 响应体无法解析
    #[error("{service} 响应解析失败: {message}")]
    Decode {
        service: &'static str,
        message: String,
    },

    /// 模型没有返回任何可用内容
    #[error("{service} 返回空结果")]
    EmptyResponse { service: &'static str },

    /// 调用方传入的参数无法组成合法请求
    #[error("无效的请求参数: {0}")]
    InvalidRequest(String),
}

/// 错误结果类型别名
pub type Result<T> = std::result::Result<T, ExternalError>;

impl ExternalError {
    pub fn transport(service: &'static str, source: reqwest::Error) -> Self {
        Self::Transport { service, source }
    }

    pub fn decode(service: &'static str, message: impl Into<String>) -> Self {
        Self::Decode {
            service,
            message: message.into(),
        }
    }

    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "EXTERNAL_TRANSPORT_ERROR",
            Self::Status { .. } => "EXTERNAL_STATUS_ERROR",
            Self::Decode { .. } => "EXTERNAL_DECODE_ERROR",
            Self::EmptyResponse { .. } => "EXTERNAL_EMPTY_RESPONSE",
            Self::InvalidRequest(_) => "EXTERNAL_INVALID_REQUEST",
        }
    }

    /// 出错的外部服务名，用于指标标签
    pub fn service(&self) -> &'static str {
        match self {
            Self::Transport { service, .. }
            | Self::Status { service, .. }
            | Self::Decode { service, .. }
            | Self::EmptyResponse { service } => service,
            Self::InvalidRequest(_) => "client",
        }
    }

    /// 对端是否明确拒绝了凭证
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self, Self::Status { status: 401 | 403, .. })
    }

    /// 对端认为查询参数无效（400，如非法 uuid）或资源不存在（404）
    ///
    /// 按主键查询时这两种情况都等同于"没有这条记录"。
    pub fn is_lookup_miss(&self) -> bool {
        matches!(self, Self::Status { status: 400 | 404, .. })
    }
}

/// 从错误响应体中提取对端给出的错误描述
///
/// 兼容几种常见格式：PostgREST 的 `message`、GoTrue 的 `msg` / `error_description`、
/// Storage 的 `error`、Google API 的 `error.message`。都不匹配时返回截断后的原始响应体。
pub fn extract_provider_message(body: &str) -> String {
    const MAX_RAW_LEN: usize = 200;

    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        let candidates = [
            value.get("message"),
            value.get("msg"),
            value.get("error_description"),
            value.pointer("/error/message"),
            value.get("error"),
        ];
        if let Some(text) = candidates
            .into_iter()
            .flatten()
            .find_map(|v| v.as_str().filter(|s| !s.is_empty()))
        {
            return text.to_string();
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(MAX_RAW_LEN).collect()
}

/// 将非 2xx 响应转换为 [`ExternalError::Status`]
pub async fn status_error(service: &'static str, response: reqwest::Response) -> ExternalError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    ExternalError::Status {
        service,
        status,
        message: extract_provider_message(&body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_provider_message_formats() {
        assert_eq!(
            extract_provider_message(r#"{"code":"23503","message":"violates foreign key"}"#),
            "violates foreign key"
        );
        assert_eq!(
            extract_provider_message(r#"{"msg":"Invalid token"}"#),
            "Invalid token"
        );
        assert_eq!(
            extract_provider_message(r#"{"error":{"code":400,"message":"API key not valid"}}"#),
            "API key not valid"
        );
        assert_eq!(
            extract_provider_message(r#"{"statusCode":"409","error":"Duplicate"}"#),
            "Duplicate"
        );
        assert_eq!(extract_provider_message("  "), "empty response body");
        assert_eq!(extract_provider_message("Bad Gateway"), "Bad Gateway");

        let long = "x".repeat(500);
        assert_eq!(extract_provider_message(&long).len(), 200);
    }

    #[test]
    fn test_lookup_miss() {
        let status = |status| ExternalError::Status {
            service: "postgrest",
            status,
            message: "invalid input syntax for type uuid".into(),
        };
        assert!(status(400).is_lookup_miss());
        assert!(status(404).is_lookup_miss());
        assert!(!status(401).is_lookup_miss());
        assert!(!status(503).is_lookup_miss());
        assert!(!ExternalError::EmptyResponse { service: "postgrest" }.is_lookup_miss());
    }

    #[test]
    fn test_error_code() {
        let err = ExternalError::Status {
            service: "postgrest",
            status: 409,
            message: "duplicate key".to_string(),
        };
        assert_eq!(err.code(), "EXTERNAL_STATUS_ERROR");
        assert_eq!(err.service(), "postgrest");
        assert!(err.to_string().contains("duplicate key"));
    }

    #[test]
    fn test_auth_rejection() {
        let unauthorized = ExternalError::Status {
            service: "supabase-auth",
            status: 401,
            message: "invalid JWT".to_string(),
        };
        assert!(unauthorized.is_auth_rejection());

        let server_error = ExternalError::Status {
            service: "supabase-auth",
            status: 500,
            message: "boom".to_string(),
        };
        assert!(!server_error.is_auth_rejection());
        assert!(!ExternalError::EmptyResponse { service: "gemini" }.is_auth_rejection());
    }
}
