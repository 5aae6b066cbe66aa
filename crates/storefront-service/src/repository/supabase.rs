//! 基于 Supabase 的仓储实现

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::de::IgnoredAny;
use tracing::{debug, instrument};
use vision_shared::error::Result;
use vision_shared::supabase::{Query, SupabaseClient};

use super::traits::{DesignRepository, GenerationRepository, ImageStore, OrderRepository};
use crate::models::{Design, NewDesign, NewGeneration, NewOrder, Order};

const DESIGNS_TABLE: &str = "designs";
const ORDERS_TABLE: &str = "orders";
const GENERATIONS_TABLE: &str = "generations";

/// Supabase 仓储
///
/// 同时实现全部仓储接口，克隆只复制内部连接池句柄。
#[derive(Clone)]
pub struct SupabaseRepository {
    client: SupabaseClient,
    bucket: String,
}

impl SupabaseRepository {
    pub fn new(client: SupabaseClient, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }
}

/// PostgREST 过滤值使用的时间格式
fn timestamp_filter(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl DesignRepository for SupabaseRepository {
    #[instrument(skip(self, design), fields(user_id = %design.user_id))]
    async fn create(&self, design: &NewDesign) -> Result<Design> {
        self.client.insert(DESIGNS_TABLE, design).await
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Design>> {
        self.client
            .select_one(DESIGNS_TABLE, Query::new().eq("id", id))
            .await
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Design>> {
        let query = Query::new()
            .order("created_at", false)
            .limit(limit as usize);
        self.client.select(DESIGNS_TABLE, &query).await
    }
}

#[async_trait]
impl OrderRepository for SupabaseRepository {
    #[instrument(skip(self, order), fields(design_id = %order.design_id))]
    async fn create(&self, order: &NewOrder) -> Result<Order> {
        self.client.insert(ORDERS_TABLE, order).await
    }
}

#[async_trait]
impl GenerationRepository for SupabaseRepository {
    async fn record(&self, generation: &NewGeneration) -> Result<()> {
        // 只需要确认写入成功，不关心返回的行内容
        let _: IgnoredAny = self.client.insert(GENERATIONS_TABLE, generation).await?;
        Ok(())
    }

    async fn count_since(&self, user_id: &str, since: DateTime<Utc>) -> Result<u64> {
        let query = Query::new()
            .select("id")
            .eq("user_id", user_id)
            .gte("created_at", timestamp_filter(since));
        let count = self.client.count(GENERATIONS_TABLE, &query).await?;
        debug!(user_id, count, "Counted generations");
        Ok(count)
    }
}

#[async_trait]
impl ImageStore for SupabaseRepository {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<String> {
        self.client
            .upload(&self.bucket, path, bytes, content_type, false)
            .await?;
        Ok(self.client.public_url(&self.bucket, path))
    }
}
