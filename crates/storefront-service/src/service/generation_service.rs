//! 设计图生成与文本辅助

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, instrument};
use vision_shared::error::ExternalError;
use vision_shared::observability::metrics;

use crate::auth::AuthUser;
use crate::error::{Result, ShopError, action};
use crate::generation::svg::{clean_product_name, extract_svg, svg_data_url};
use crate::generation::{ModelTier, TextModel, prompts};
use crate::models::NewGeneration;
use crate::models::catalog::DEFAULT_COLOR;

use super::quota::QuotaService;
use super::required;

pub struct GenerationService {
    model: Arc<dyn TextModel>,
    quota: Arc<QuotaService>,
}

impl GenerationService {
    pub fn new(model: Arc<dyn TextModel>, quota: Arc<QuotaService>) -> Self {
        Self { model, quota }
    }

    /// 生成设计图，返回 SVG data URL
    ///
    /// 顺序：参数检查 → 配额检查 → 模型调用 → SVG 清洗 → 记录生成。
    /// 只有成功的生成才会写入记录。
    ///
    /// 模型输出中没有 SVG 元素时按生成失败处理，不会把原始文本当作图片编码返回，
    /// 也不消耗配额。
    #[instrument(skip(self, user, prompt), fields(user_id = %user.id))]
    pub async fn generate(
        &self,
        user: &AuthUser,
        prompt: &str,
        color: Option<&str>,
    ) -> Result<String> {
        let prompt = required(prompt, "Prompt is required")?;
        let color = color
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR);

        self.quota.ensure_available(&user.id).await?;

        let start = Instant::now();
        let outcome = self
            .model
            .generate(ModelTier::Standard, &prompts::svg_design(prompt, color))
            .await
            .and_then(|raw| {
                extract_svg(&raw).ok_or_else(|| {
                    ExternalError::decode("gemini", "response contains no SVG element")
                })
            });
        let elapsed = start.elapsed().as_secs_f64();

        let svg = match outcome {
            Ok(svg) => {
                metrics::record_design_generation("success", elapsed);
                svg
            }
            Err(e) => {
                metrics::record_design_generation("failure", elapsed);
                return Err(ShopError::upstream(action::GENERATE_DESIGN)(e));
            }
        };

        self.quota
            .record(NewGeneration {
                user_id: user.id.clone(),
                prompt: prompt.to_string(),
                color: color.to_string(),
            })
            .await;

        info!(svg_len = svg.len(), elapsed_secs = elapsed, "Design generated");
        Ok(svg_data_url(&svg))
    }

    /// 优化提示词
    pub async fn enhance_prompt(&self, prompt: &str) -> Result<String> {
        let prompt = required(prompt, "Prompt is required")?;
        let enhanced = self
            .model
            .generate(ModelTier::Lite, &prompts::enhance(prompt))
            .await
            .map_err(ShopError::upstream(action::ENHANCE_PROMPT))?;
        Ok(enhanced.trim().to_string())
    }

    /// 根据设计描述建议商品名
    pub async fn suggest_name(&self, prompt: &str) -> Result<String> {
        let prompt = required(prompt, "Prompt is required")?;
        let raw = self
            .model
            .generate(ModelTier::Lite, &prompts::suggest_name(prompt))
            .await
            .map_err(ShopError::upstream(action::SUGGEST_NAME))?;

        let name = clean_product_name(&raw);
        if name.is_empty() {
            return Err(ShopError::upstream(action::SUGGEST_NAME)(
                ExternalError::EmptyResponse { service: "gemini" },
            ));
        }
        Ok(name)
    }
}
