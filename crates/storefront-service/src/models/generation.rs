//! 生成记录与配额

use chrono::{DateTime, Days, NaiveTime, Utc};
use serde::Serialize;

/// 插入 `generations` 表的新行，每次成功生成一条
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewGeneration {
    pub user_id: String,
    pub prompt: String,
    pub color: String,
}

/// 当日配额使用情况
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaStatus {
    pub used: u64,
    pub limit: u32,
    pub remaining: u64,
    pub resets_at: DateTime<Utc>,
}

impl QuotaStatus {
    pub fn new(used: u64, limit: u32, now: DateTime<Utc>) -> Self {
        Self {
            used,
            limit,
            remaining: u64::from(limit).saturating_sub(used),
            resets_at: next_utc_midnight(now),
        }
    }

    /// 已用次数达到上限即不可再生成
    pub fn is_exhausted(&self) -> bool {
        self.used >= u64::from(self.limit)
    }
}

/// 当天 UTC 零点
pub fn utc_day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// 下一个 UTC 零点
pub fn next_utc_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    let start = utc_day_start(now);
    start.checked_add_days(Days::new(1)).unwrap_or(start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_day_boundaries() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 23, 59, 59).unwrap();
        assert_eq!(
            utc_day_start(now),
            Utc.with_ymd_and_hms(2026, 10, 16, 0, 0, 0).unwrap()
        );
        assert_eq!(
            next_utc_midnight(now),
            Utc.with_ymd_and_hms(2026, 10, 17, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_quota_boundary() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();

        let status = QuotaStatus::new(9, 10, now);
        assert!(!status.is_exhausted());
        assert_eq!(status.remaining, 1);

        let status = QuotaStatus::new(10, 10, now);
        assert!(status.is_exhausted());
        assert_eq!(status.remaining, 0);

        // 并发请求可能让已用次数超过上限
        let status = QuotaStatus::new(12, 10, now);
        assert_eq!(status.remaining, 0);

        assert!(QuotaStatus::new(0, 0, now).is_exhausted());
    }

    #[test]
    fn test_quota_status_wire_format() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0).unwrap();
        let json = serde_json::to_value(QuotaStatus::new(3, 10, now)).unwrap();
        assert_eq!(json["used"], 3);
        assert_eq!(json["remaining"], 7);
        assert_eq!(json["resetsAt"], "2026-10-17T00:00:00Z");
    }
}
