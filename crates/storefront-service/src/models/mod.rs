//! 店铺领域模型
//!
//! 表行映射（`designs`、`orders`、`generations`）以及商品目录常量。

pub mod catalog;
pub mod design;
pub mod generation;
pub mod order;

pub use catalog::{ShirtColor, ShirtSize, SizeMeasurement, SizeUnit};
pub use design::{Design, NewDesign, ShipmentDetails};
pub use generation::{NewGeneration, QuotaStatus};
pub use order::{NewOrder, Order, OrderStatus};

use serde::{Deserialize, Deserializer};

/// 主键可能是 uuid 字符串，也可能是自增整数，统一读成字符串
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
