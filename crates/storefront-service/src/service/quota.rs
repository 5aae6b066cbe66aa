//! 每日生成配额
//!
//! 已用次数 = 用户当天（UTC）成功生成的记录数。检查和记录不是原子操作，
//! 同一用户的并发请求可能超出上限，超出量不超过同时在途的请求数。

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};
use vision_shared::observability::metrics;

use crate::error::{Result, ShopError, action};
use crate::models::NewGeneration;
use crate::models::generation::{QuotaStatus, utc_day_start};
use crate::repository::GenerationRepository;

pub struct QuotaService {
    generations: Arc<dyn GenerationRepository>,
    daily_limit: u32,
}

impl QuotaService {
    pub fn new(generations: Arc<dyn GenerationRepository>, daily_limit: u32) -> Self {
        Self {
            generations,
            daily_limit,
        }
    }

    /// 当日配额使用情况
    pub async fn status(&self, user_id: &str) -> Result<QuotaStatus> {
        self.status_at(user_id, Utc::now()).await
    }

    async fn status_at(&self, user_id: &str, now: DateTime<Utc>) -> Result<QuotaStatus> {
        let used = self
            .generations
            .count_since(user_id, utc_day_start(now))
            .await
            .map_err(ShopError::upstream(action::CHECK_QUOTA))?;
        Ok(QuotaStatus::new(used, self.daily_limit, now))
    }

    /// 确认还有剩余次数，用完时返回 `QuotaExceeded`
    pub async fn ensure_available(&self, user_id: &str) -> Result<QuotaStatus> {
        let status = self.status(user_id).await?;
        if status.is_exhausted() {
            info!(user_id, used = status.used, limit = status.limit, "Generation quota exhausted");
            metrics::record_quota_rejection();
            return Err(ShopError::QuotaExceeded {
                limit: self.daily_limit,
            });
        }
        Ok(status)
    }

    /// 记录一次成功生成
    ///
    /// 写入失败只记日志，本次生成不计入配额。
    pub async fn record(&self, generation: NewGeneration) {
        if let Err(e) = self.generations.record(&generation).await {
            warn!(
                user_id = %generation.user_id,
                error = %e,
                "Failed to record generation, quota not consumed"
            );
            metrics::record_external_failure(e.service(), "record_generation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockGenerationRepository;
    use chrono::TimeZone;
    use vision_shared::error::ExternalError;

    fn service(used: u64, limit: u32) -> QuotaService {
        let mut repo = MockGenerationRepository::new();
        repo.expect_count_since()
            .returning(move |_, _| Ok(used));
        QuotaService::new(Arc::new(repo), limit)
    }

    #[tokio::test]
    async fn test_counts_from_utc_midnight() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 15, 30, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap();

        let mut repo = MockGenerationRepository::new();
        repo.expect_count_since()
            .withf(move |user_id, since| user_id == "u-1" && *since == midnight)
            .times(1)
            .returning(|_, _| Ok(4));

        let quota = QuotaService::new(Arc::new(repo), 10);
        let status = quota.status_at("u-1", now).await.unwrap();
        assert_eq!(status.used, 4);
        assert_eq!(status.remaining, 6);
        assert_eq!(
            status.resets_at,
            Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_last_generation_of_the_day_is_allowed() {
        let status = service(9, 10).ensure_available("u-1").await.unwrap();
        assert_eq!(status.remaining, 1);
    }

    #[tokio::test]
    async fn test_limit_reached_is_rejected() {
        let err = service(10, 10).ensure_available("u-1").await.unwrap_err();
        assert!(matches!(err, ShopError::QuotaExceeded { limit: 10 }));
    }

    #[tokio::test]
    async fn test_zero_limit_disables_generation() {
        let err = service(0, 0).ensure_available("u-1").await.unwrap_err();
        assert!(matches!(err, ShopError::QuotaExceeded { limit: 0 }));
    }

    #[tokio::test]
    async fn test_count_failure_is_upstream_error() {
        let mut repo = MockGenerationRepository::new();
        repo.expect_count_since().returning(|_, _| {
            Err(ExternalError::Status {
                service: "postgrest",
                status: 500,
                message: "boom".into(),
            })
        });
        let err = QuotaService::new(Arc::new(repo), 10)
            .ensure_available("u-1")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to check generation quota");
    }

    #[tokio::test]
    async fn test_record_failure_is_swallowed() {
        let mut repo = MockGenerationRepository::new();
        repo.expect_record()
            .times(1)
            .returning(|_| Err(ExternalError::EmptyResponse { service: "postgrest" }));
        QuotaService::new(Arc::new(repo), 10)
            .record(NewGeneration {
                user_id: "u-1".into(),
                prompt: "fox".into(),
                color: "Classic Black".into(),
            })
            .await;
    }
}
