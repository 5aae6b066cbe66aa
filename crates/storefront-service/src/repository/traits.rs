//! 仓储接口

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use vision_shared::error::Result;

use crate::models::{Design, NewDesign, NewGeneration, NewOrder, Order};

/// 设计作品仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DesignRepository: Send + Sync {
    /// 插入并返回完整记录
    async fn create(&self, design: &NewDesign) -> Result<Design>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Design>>;

    /// 按创建时间倒序
    async fn list_recent(&self, limit: u32) -> Result<Vec<Design>>;
}

/// 订单仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn create(&self, order: &NewOrder) -> Result<Order>;
}

/// 生成记录仓储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationRepository: Send + Sync {
    async fn record(&self, generation: &NewGeneration) -> Result<()>;

    /// 统计用户在 `since` 之后（含）的生成次数
    async fn count_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<u64>;
}

/// 图片存储
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// 上传并返回公开访问地址
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String>;
}
