//! 生成式 AI 接入
//!
//! - `prompts`: 发给模型的提示词模板
//! - `svg`: 模型输出的清洗和编码
//! - [`TextModel`]: 文本模型接口及其 Gemini 实现

pub mod prompts;
pub mod svg;

use async_trait::async_trait;
use tracing::instrument;
use vision_shared::config::GeminiConfig;
use vision_shared::error::ExternalError;
use vision_shared::gemini::GeminiClient;

/// 调用档位
///
/// 图片生成和轻量文本任务使用不同的 API key，便于分别计费和限流。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// 设计图生成
    Standard,
    /// 提示词优化、商品命名
    Lite,
}

impl ModelTier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Lite => "lite",
        }
    }
}

/// 文本生成模型
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate(&self, tier: ModelTier, prompt: &str) -> Result<String, ExternalError>;
}

/// Gemini 文本模型
pub struct GeminiTextModel {
    client: GeminiClient,
    standard_key: String,
    lite_key: String,
}

impl GeminiTextModel {
    pub fn new(client: GeminiClient, config: &GeminiConfig) -> Self {
        Self {
            client,
            standard_key: config.api_key.clone(),
            lite_key: config.effective_lite_key().to_string(),
        }
    }

    fn key_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Standard => &self.standard_key,
            ModelTier::Lite => &self.lite_key,
        }
    }
}

#[async_trait]
impl TextModel for GeminiTextModel {
    #[instrument(skip(self, prompt), fields(tier = tier.as_str()))]
    async fn generate(&self, tier: ModelTier, prompt: &str) -> Result<String, ExternalError> {
        self.client.generate_text(self.key_for(tier), prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lite_key_falls_back_to_standard() {
        let config = GeminiConfig {
            api_key: "standard-key".to_string(),
            lite_api_key: None,
            ..Default::default()
        };
        let client = GeminiClient::new(&config).unwrap();
        let model = GeminiTextModel::new(client.clone(), &config);
        assert_eq!(model.key_for(ModelTier::Lite), "standard-key");

        let config = GeminiConfig {
            lite_api_key: Some("lite-key".to_string()),
            ..config
        };
        let model = GeminiTextModel::new(client, &config);
        assert_eq!(model.key_for(ModelTier::Standard), "standard-key");
        assert_eq!(model.key_for(ModelTier::Lite), "lite-key");
    }
}
