//! 订单模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ShirtSize;

/// 订单状态
///
/// 下单时固定为 `placed`，后续状态由履约系统在表中直接更新。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

/// `orders` 表中的一行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(deserialize_with = "super::flexible_id")]
    pub id: String,
    pub user_id: String,
    #[serde(deserialize_with = "super::flexible_id")]
    pub design_id: String,
    pub size: ShirtSize,
    pub shipment_name: String,
    pub shipment_address: String,
    pub shipment_phone: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// 插入 `orders` 表的新行
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewOrder {
    pub user_id: String,
    pub design_id: String,
    pub size: ShirtSize,
    pub shipment_name: String,
    pub shipment_address: String,
    pub shipment_phone: String,
    pub status: OrderStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_wire_format() {
        let order = NewOrder {
            user_id: "u-1".into(),
            design_id: "d-1".into(),
            size: ShirtSize::DoubleExtraLarge,
            shipment_name: "Ada".into(),
            shipment_address: "1 Main St".into(),
            shipment_phone: "555".into(),
            status: OrderStatus::Placed,
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["size"], "2X");
        assert_eq!(json["status"], "placed");
    }

    #[test]
    fn test_order_row_with_numeric_ids() {
        let order: Order = serde_json::from_value(serde_json::json!({
            "id": 7,
            "user_id": "u-1",
            "design_id": 42,
            "size": "M",
            "shipment_name": "Ada",
            "shipment_address": "1 Main St",
            "shipment_phone": "555",
            "status": "placed",
            "created_at": "2026-10-16T08:30:00+00:00"
        }))
        .unwrap();
        assert_eq!(order.id, "7");
        assert_eq!(order.design_id, "42");
        assert_eq!(order.size, ShirtSize::Medium);
    }
}
