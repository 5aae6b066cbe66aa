//! 业务服务层

pub mod design_service;
pub mod generation_service;
pub mod image;
pub mod order_service;
pub mod quota;

pub use design_service::DesignService;
pub use generation_service::GenerationService;
pub use order_service::OrderService;
pub use quota::QuotaService;

use crate::error::{Result, ShopError};

/// 必填文本字段：去掉首尾空白后不能为空
pub(crate) fn required<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShopError::MissingFields(message.to_string()));
    }
    Ok(trimmed)
}

/// 选填文本字段：空白视为未填写
pub(crate) fn optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
