//! 对象存储

use tracing::instrument;

use super::SupabaseClient;
use crate::error::{ExternalError, Result, status_error};

const SERVICE: &str = "supabase-storage";

impl SupabaseClient {
    /// 上传对象
    ///
    /// `upsert = false` 时同名对象已存在会返回 409。
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
        upsert: bool,
    ) -> Result<()> {
        if path.is_empty() || path.starts_with('/') {
            return Err(ExternalError::InvalidRequest(format!(
                "invalid object path: {path:?}"
            )));
        }

        let url = self.endpoint(&format!("/storage/v1/object/{bucket}/{path}"));
        let response = self
            .as_service(self.http.post(url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", upsert.to_string())
            .body(bytes)
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }
        Ok(())
    }

    /// 公开桶中对象的访问地址
    pub fn public_url(&self, bucket: &str, path: &str) -> String {
        self.endpoint(&format!("/storage/v1/object/public/{bucket}/{path}"))
    }
}
