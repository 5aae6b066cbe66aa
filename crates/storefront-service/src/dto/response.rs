//! 响应 DTO 定义
//!
//! 所有 REST API 的响应体结构

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::catalog::color_hex;
use crate::models::{Design, Order, OrderStatus, ShirtSize};

/// API 统一响应
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub code: String,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            code: "SUCCESS".to_string(),
            message: "OK".to_string(),
            data: Some(data),
        }
    }

    /// 创建错误响应
    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            code: code.to_string(),
            message: message.to_string(),
            data: None,
        }
    }
}

/// 生成结果，`image` 为 SVG data URL
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub image: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancePromptResponse {
    pub enhanced_prompt: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestNameResponse {
    pub suggested_name: String,
}

/// 设计作品 DTO
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignDto {
    pub id: String,
    pub user_id: String,
    pub image_url: String,
    pub prompt: String,
    pub base_color: String,
    pub product_name: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    pub designer: String,
    pub created_at: DateTime<Utc>,
}

impl From<Design> for DesignDto {
    fn from(design: Design) -> Self {
        Self {
            designer: design.designer_handle(),
            price: design.display_price(),
            id: design.id,
            user_id: design.user_id,
            image_url: design.image_url,
            prompt: design.prompt_text,
            base_color: design.base_color,
            product_name: design.product_name,
            description: design.description,
            created_at: design.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveDesignResponse {
    pub design: DesignDto,
}

/// 作品列表
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignListResponse {
    pub items: Vec<DesignDto>,
    pub count: usize,
}

impl DesignListResponse {
    pub fn new(designs: Vec<Design>) -> Self {
        let items: Vec<DesignDto> = designs.into_iter().map(DesignDto::from).collect();
        Self {
            count: items.len(),
            items,
        }
    }
}

/// 商品详情页视图
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub edition: String,
    pub price: f64,
    pub description: String,
    pub image_url: String,
    pub prompt: String,
    pub base_color: String,
    pub color_hex: String,
    pub designer: String,
    pub sizes: Vec<ShirtSize>,
    pub created_at: DateTime<Utc>,
}

impl From<Design> for ProductView {
    fn from(design: Design) -> Self {
        Self {
            name: design.display_name(),
            edition: format!("{} Edition", design.base_color),
            price: design.display_price(),
            description: design.display_description(),
            color_hex: color_hex(&design.base_color),
            designer: design.designer_handle(),
            sizes: ShirtSize::ALL.to_vec(),
            id: design.id,
            image_url: design.image_url,
            prompt: design.prompt_text,
            base_color: design.base_color,
            created_at: design.created_at,
        }
    }
}

/// 订单 DTO
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDto {
    pub id: String,
    pub design_id: String,
    pub size: ShirtSize,
    pub shipment_name: String,
    pub shipment_address: String,
    pub shipment_phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl From<Order> for OrderDto {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            design_id: order.design_id,
            size: order.size,
            shipment_name: order.shipment_name,
            shipment_address: order.shipment_address,
            shipment_phone: order.shipment_phone,
            status: order.status,
            created_at: order.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order: OrderDto,
}

/// 尺码表
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeGuideResponse {
    pub unit: crate::models::SizeUnit,
    pub measurements: &'static [crate::models::SizeMeasurement],
}

#[cfg(test)]
mod tests {
    use super::*;

    fn design() -> Design {
        serde_json::from_value(serde_json::json!({
            "id": 42,
            "user_id": "u-1",
            "image_url": "https://cdn.test/u-1/1-design.svg",
            "prompt_text": "a fox in the snow",
            "base_color": "Crimson Red",
            "user_email": "ada@example.com",
            "product_name": "Snow Fox",
            "price": 30.5,
            "created_at": "2026-10-16T08:30:00+00:00"
        }))
        .unwrap()
    }

    #[test]
    fn test_success_envelope() {
        let json = serde_json::to_value(ApiResponse::success(GenerateResponse {
            image: "data:image/svg+xml;base64,AA==".into(),
        }))
        .unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["code"], "SUCCESS");
        assert_eq!(json["data"]["image"], "data:image/svg+xml;base64,AA==");
    }

    #[test]
    fn test_error_envelope_has_null_data() {
        let json = serde_json::to_value(ApiResponse::<()>::error("UNAUTHORIZED", "Unauthorized")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json.get("data"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_product_view() {
        let view = ProductView::from(design());
        assert_eq!(view.id, "42");
        assert_eq!(view.name, "Snow Fox");
        assert_eq!(view.edition, "Crimson Red Edition");
        assert_eq!(view.color_hex, "#DC2626");
        assert_eq!(view.designer, "ada");
        assert_eq!(view.price, 30.5);
        assert_eq!(view.sizes.len(), 6);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["imageUrl"], "https://cdn.test/u-1/1-design.svg");
        assert_eq!(json["sizes"][5], "2X");
    }

    #[test]
    fn test_design_list() {
        let list = DesignListResponse::new(vec![design(), design()]);
        assert_eq!(list.count, 2);
        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["items"][0]["prompt"], "a fox in the snow");
        assert_eq!(json["items"][0]["baseColor"], "Crimson Red");
    }
}
