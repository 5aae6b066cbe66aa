//! PostgREST 表操作
//!
//! 只覆盖本项目需要的子集：单行插入、带过滤条件的查询和计数。
//! 过滤条件使用 PostgREST 的查询参数语法（`column=eq.value`）。

use serde::{Serialize, de::DeserializeOwned};
use tracing::instrument;

use super::SupabaseClient;
use crate::error::{ExternalError, Result, status_error};

const SERVICE: &str = "postgrest";

/// 过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
enum Filter {
    Eq(String, String),
    Gte(String, String),
}

impl Filter {
    fn to_param(&self) -> (String, String) {
        match self {
            Self::Eq(column, value) => (column.clone(), format!("eq.{value}")),
            Self::Gte(column, value) => (column.clone(), format!("gte.{value}")),
        }
    }
}

/// 查询构造器
#[derive(Debug, Clone)]
pub struct Query {
    columns: String,
    filters: Vec<Filter>,
    order: Option<(String, bool)>,
    limit: Option<usize>,
}

impl Default for Query {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// 指定返回列，默认 `*`
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_string();
        self
    }

    /// `column = value`
    pub fn eq(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push(Filter::Eq(column.to_string(), value.to_string()));
        self
    }

    /// `column >= value`
    pub fn gte(mut self, column: &str, value: impl ToString) -> Self {
        self.filters
            .push(Filter::Gte(column.to_string(), value.to_string()));
        self
    }

    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        self.order = Some((column.to_string(), ascending));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 转换为查询参数，由 reqwest 负责 URL 编码
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![("select".to_string(), self.columns.clone())];
        params.extend(self.filters.iter().map(Filter::to_param));
        if let Some((column, ascending)) = &self.order {
            let direction = if *ascending { "asc" } else { "desc" };
            params.push(("order".to_string(), format!("{column}.{direction}")));
        }
        if let Some(limit) = self.limit {
            params.push(("limit".to_string(), limit.to_string()));
        }
        params
    }
}

/// 从 `Content-Range` 响应头中解析总行数
///
/// 格式为 `0-9/42`、`*/0`；总数未知时为 `0-9/*`，返回 `None`。
pub fn parse_content_range_total(header: &str) -> Option<u64> {
    let (_, total) = header.trim().rsplit_once('/')?;
    total.parse().ok()
}

impl SupabaseClient {
    fn table_url(&self, table: &str) -> String {
        self.endpoint(&format!("/rest/v1/{table}"))
    }

    /// 插入一行并返回插入后的完整记录
    #[instrument(skip(self, row))]
    pub async fn insert<T, R>(&self, table: &str, row: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .as_service(self.http.post(self.table_url(table)))
            .header("Prefer", "return=representation")
            .json(row)
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let mut rows: Vec<R> = response
            .json()
            .await
            .map_err(|e| ExternalError::decode(SERVICE, e.to_string()))?;

        if rows.is_empty() {
            return Err(ExternalError::decode(
                SERVICE,
                format!("insert into {table} returned no rows"),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    /// 按条件查询多行
    #[instrument(skip(self))]
    pub async fn select<R>(&self, table: &str, query: &Query) -> Result<Vec<R>>
    where
        R: DeserializeOwned,
    {
        let response = self
            .as_service(self.http.get(self.table_url(table)))
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        response
            .json()
            .await
            .map_err(|e| ExternalError::decode(SERVICE, e.to_string()))
    }

    /// 查询第一行，不存在时返回 `None`
    pub async fn select_one<R>(&self, table: &str, query: Query) -> Result<Option<R>>
    where
        R: DeserializeOwned,
    {
        let rows: Vec<R> = self.select(table, &query.limit(1)).await?;
        Ok(rows.into_iter().next())
    }

    /// 按条件计数
    ///
    /// 使用 HEAD 请求加 `Prefer: count=exact`，总数从 `Content-Range` 中读取，不传输行数据。
    #[instrument(skip(self))]
    pub async fn count(&self, table: &str, query: &Query) -> Result<u64> {
        let response = self
            .as_service(self.http.head(self.table_url(table)))
            .header("Prefer", "count=exact")
            .query(&query.to_params())
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            // HEAD 响应没有响应体，只能带上状态码
            return Err(ExternalError::Status {
                service: SERVICE,
                status: response.status().as_u16(),
                message: format!("count on {table} failed"),
            });
        }

        response
            .headers()
            .get("content-range")
            .and_then(|v| v.to_str().ok())
            .and_then(parse_content_range_total)
            .ok_or_else(|| ExternalError::decode(SERVICE, "missing or unknown Content-Range total"))
    }
}
