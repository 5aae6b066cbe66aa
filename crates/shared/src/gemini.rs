//! Gemini 文本生成客户端
//!
//! 调用 `generateContent` 接口，只处理单轮纯文本请求。

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::GeminiConfig;
use crate::error::{ExternalError, Result, status_error};

const SERVICE: &str = "gemini";

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// 拼接第一个候选结果中的全部文本片段
fn first_candidate_text(response: GenerateContentResponse) -> Option<String> {
    let candidate = response.candidates.into_iter().next()?;
    if let Some(reason) = &candidate.finish_reason {
        debug!(finish_reason = %reason, "Gemini candidate finished");
    }
    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if text.trim().is_empty() { None } else { Some(text) }
}

/// Gemini 客户端
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        info!(model = %config.model, "Gemini client created");

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// 生成文本
    ///
    /// 不同用途使用不同的 key，由调用方传入。
    #[instrument(skip(self, api_key, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate_text(&self, api_key: &str, prompt: &str) -> Result<String> {
        if api_key.is_empty() {
            return Err(ExternalError::InvalidRequest(
                "Gemini API key is not configured".to_string(),
            ));
        }

        let body = GenerateContentRequest {
            contents: [Content {
                parts: [Part { text: prompt }],
            }],
        };

        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ExternalError::transport(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(status_error(SERVICE, response).await);
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ExternalError::decode(SERVICE, e.to_string()))?;

        first_candidate_text(parsed).ok_or(ExternalError::EmptyResponse { service: SERVICE })
    }
}
