//! 请求 DTO 定义
//!
//! 必填文本字段缺失时反序列化为空串，由服务层统一按 `MISSING_FIELDS` 处理，
//! 长度和取值范围由 validator 校验。

use serde::Deserialize;
use validator::Validate;

use crate::models::{ShipmentDetails, SizeUnit};

/// 生成设计图请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Prompt must be at most 1000 characters"))]
    pub prompt: String,
    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: Option<String>,
}

/// 提示词优化和命名建议共用的请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PromptRequest {
    #[serde(default)]
    #[validate(length(max = 1000, message = "Prompt must be at most 1000 characters"))]
    pub prompt: String,
}

/// 收货信息
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetailsInput {
    #[serde(default)]
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 500, message = "Address must be at most 500 characters"))]
    pub address: String,
    #[serde(default)]
    #[validate(length(max = 30, message = "Phone must be at most 30 characters"))]
    pub phone: String,
}

impl From<ShipmentDetailsInput> for ShipmentDetails {
    fn from(input: ShipmentDetailsInput) -> Self {
        Self {
            name: input.name.trim().to_string(),
            address: input.address.trim().to_string(),
            phone: input.phone.trim().to_string(),
        }
    }
}

/// 保存设计请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveDesignRequest {
    /// data URL（`data:image/svg+xml;base64,...`）或裸 base64
    #[serde(default)]
    pub base64_image: String,
    #[serde(default)]
    #[validate(length(max = 1000, message = "Prompt must be at most 1000 characters"))]
    pub prompt: String,
    #[serde(default)]
    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: String,
    #[validate(length(max = 100, message = "Name must be at most 100 characters"))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 10000.0, message = "Price must be between 0 and 10000"))]
    pub price: Option<f64>,
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,
    #[validate(nested)]
    pub shipment_details: Option<ShipmentDetailsInput>,
}

/// 下单请求
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    #[serde(default, deserialize_with = "crate::models::flexible_id")]
    pub design_id: String,
    #[serde(default)]
    pub size: String,
    #[validate(nested)]
    pub shipment_details: Option<ShipmentDetailsInput>,
}

/// 作品列表查询参数
#[derive(Debug, Default, Deserialize, Validate)]
pub struct DesignListQuery {
    #[validate(range(min = 1, max = 100, message = "limit must be between 1 and 100"))]
    pub limit: Option<u32>,
}

impl DesignListQuery {
    pub const DEFAULT_LIMIT: u32 = 50;

    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT)
    }
}

/// 尺码表查询参数
#[derive(Debug, Default, Deserialize)]
pub struct SizeGuideQuery {
    #[serde(default)]
    pub unit: SizeUnit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_text_fields_default_to_empty() {
        let req: GenerateRequest = serde_json::from_str("{}").unwrap();
        assert!(req.prompt.is_empty());
        assert!(req.color.is_none());

        let req: CreateOrderRequest = serde_json::from_str("{}").unwrap();
        assert!(req.design_id.is_empty());
        assert!(req.shipment_details.is_none());
    }

    #[test]
    fn test_save_design_request_camel_case() {
        let req: SaveDesignRequest = serde_json::from_value(serde_json::json!({
            "base64Image": "data:image/svg+xml;base64,PHN2Zz48L3N2Zz4=",
            "prompt": "fox",
            "color": "Navy Blue",
            "price": 30,
            "shipmentDetails": {"name": "Ada", "address": "1 Main St", "phone": "555"}
        }))
        .unwrap();
        assert!(req.base64_image.starts_with("data:"));
        assert_eq!(req.price, Some(30.0));
        assert_eq!(req.shipment_details.unwrap().phone, "555");
    }

    #[test]
    fn test_order_design_id_accepts_number() {
        let req: CreateOrderRequest =
            serde_json::from_str(r#"{"designId": 42, "size": "M"}"#).unwrap();
        assert_eq!(req.design_id, "42");
    }

    #[test]
    fn test_validation_limits() {
        let req = SaveDesignRequest {
            price: Some(-1.0),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        let req = SaveDesignRequest {
            shipment_details: Some(ShipmentDetailsInput {
                phone: "5".repeat(31),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert!(req.validate().is_err());

        assert!(DesignListQuery { limit: Some(0) }.validate().is_err());
        assert!(DesignListQuery { limit: Some(101) }.validate().is_err());
        assert!(DesignListQuery { limit: Some(100) }.validate().is_ok());
        assert_eq!(DesignListQuery::default().limit(), 50);
    }

    #[test]
    fn test_shipment_input_is_trimmed() {
        let details: ShipmentDetails = ShipmentDetailsInput {
            name: " Ada ".into(),
            address: "1 Main St\n".into(),
            phone: "555".into(),
        }
        .into();
        assert_eq!(details.name, "Ada");
        assert_eq!(details.address, "1 Main St");
    }
}
