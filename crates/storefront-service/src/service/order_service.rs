//! 下单

use std::sync::Arc;

use tracing::{info, instrument};
use vision_shared::observability::metrics;

use crate::auth::AuthUser;
use crate::dto::CreateOrderRequest;
use crate::error::{Result, ShopError, action};
use crate::models::{NewOrder, Order, OrderStatus, ShipmentDetails, ShirtSize};
use crate::repository::{DesignRepository, OrderRepository};

use super::required;

pub struct OrderService {
    orders: Arc<dyn OrderRepository>,
    designs: Arc<dyn DesignRepository>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderRepository>, designs: Arc<dyn DesignRepository>) -> Self {
        Self { orders, designs }
    }

    /// 创建订单
    ///
    /// 校验顺序：必填字段 → 尺码 → 设计存在 → 写入，状态固定为 `placed`。
    #[instrument(skip(self, user, request), fields(user_id = %user.id, design_id = %request.design_id))]
    pub async fn place(&self, user: &AuthUser, request: CreateOrderRequest) -> Result<Order> {
        let design_id = required(&request.design_id, "Missing required fields")?;
        let size = required(&request.size, "Missing required fields")?;
        let shipment: ShipmentDetails = request
            .shipment_details
            .ok_or_else(|| ShopError::MissingFields("Missing required fields".to_string()))?
            .into();
        if !shipment.is_complete() {
            return Err(ShopError::MissingFields(
                "Shipment name, address and phone are required".to_string(),
            ));
        }

        let size: ShirtSize = size.parse().map_err(ShopError::Validation)?;

        let design = match self.designs.find_by_id(design_id).await {
            Ok(Some(design)) => design,
            Ok(None) => return Err(ShopError::DesignNotFound(design_id.to_string())),
            Err(e) if e.is_lookup_miss() => {
                return Err(ShopError::DesignNotFound(design_id.to_string()));
            }
            Err(e) => return Err(ShopError::upstream(action::CREATE_ORDER)(e)),
        };

        let order = self
            .orders
            .create(&NewOrder {
                user_id: user.id.clone(),
                design_id: design.id,
                size,
                shipment_name: shipment.name,
                shipment_address: shipment.address,
                shipment_phone: shipment.phone,
                status: OrderStatus::Placed,
            })
            .await
            .map_err(ShopError::upstream(action::CREATE_ORDER))?;

        metrics::record_order_placed(size.as_str());
        info!(order_id = %order.id, size = %size, "Order placed");
        Ok(order)
    }
}
