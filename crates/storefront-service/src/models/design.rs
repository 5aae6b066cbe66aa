//! 设计作品模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 未设置价格时的默认售价
pub const DEFAULT_PRICE: f64 = 25.0;

/// `designs` 表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    #[serde(deserialize_with = "super::flexible_id")]
    pub id: String,
    pub user_id: String,
    pub image_url: String,
    pub prompt_text: String,
    pub base_color: String,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub shipment_name: Option<String>,
    #[serde(default)]
    pub shipment_address: Option<String>,
    #[serde(default)]
    pub shipment_phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Design {
    /// 设计者展示名：邮箱 @ 之前的部分
    pub fn designer_handle(&self) -> String {
        self.user_email
            .as_deref()
            .and_then(|email| email.split('@').next())
            .filter(|handle| !handle.is_empty())
            .unwrap_or("Community Member")
            .to_string()
    }

    pub fn display_name(&self) -> String {
        self.product_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or("Custom Design T-Shirt")
            .to_string()
    }

    pub fn display_price(&self) -> f64 {
        self.price.unwrap_or(DEFAULT_PRICE)
    }

    /// 商品描述，没有填写时按提示词生成
    pub fn display_description(&self) -> String {
        match self.description.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format!(
                "A unique, AI-generated design featuring \"{}\". Printed on high-quality, 100% organic cotton.",
                self.prompt_text
            ),
        }
    }
}

/// 收货信息
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentDetails {
    pub name: String,
    pub address: String,
    pub phone: String,
}

impl ShipmentDetails {
    /// 三项都非空才算完整
    pub fn is_complete(&self) -> bool {
        [&self.name, &self.address, &self.phone]
            .iter()
            .all(|field| !field.trim().is_empty())
    }
}

/// 插入 `designs` 表的新行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewDesign {
    pub user_id: String,
    pub image_url: String,
    pub prompt_text: String,
    pub base_color: String,
    pub user_email: Option<String>,
    pub product_name: Option<String>,
    pub price: f64,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipment_phone: Option<String>,
}

impl NewDesign {
    /// 附加收货信息
    pub fn with_shipment(mut self, shipment: Option<ShipmentDetails>) -> Self {
        if let Some(details) = shipment {
            self.shipment_name = Some(details.name);
            self.shipment_address = Some(details.address);
            self.shipment_phone = Some(details.phone);
        }
        self
    }
}
