//! 应用状态定义
//!
//! 包含 Axum 路由共享的应用状态

use std::sync::Arc;

use tracing::info;
use vision_shared::config::{AppConfig, AuthMode};
use vision_shared::error::ExternalError;
use vision_shared::gemini::GeminiClient;
use vision_shared::supabase::SupabaseClient;

use crate::auth::{Authenticator, JwtAuthenticator, SupabaseAuthenticator};
use crate::generation::{GeminiTextModel, TextModel};
use crate::repository::{
    DesignRepository, GenerationRepository, ImageStore, OrderRepository, SupabaseRepository,
};
use crate::service::{DesignService, GenerationService, OrderService, QuotaService};

/// 外部依赖接口集合
///
/// 生产环境由 [`AppState::from_config`] 用 Supabase / Gemini 实现填充，测试中替换为 mock。
pub struct Ports {
    pub authenticator: Arc<dyn Authenticator>,
    pub model: Arc<dyn TextModel>,
    pub designs: Arc<dyn DesignRepository>,
    pub orders: Arc<dyn OrderRepository>,
    pub generations: Arc<dyn GenerationRepository>,
    pub images: Arc<dyn ImageStore>,
}

/// Axum 应用共享状态
///
/// 只持有 `Arc` 包装的服务，克隆开销很小，没有可变共享状态。
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
    pub generation: Arc<GenerationService>,
    pub quota: Arc<QuotaService>,
    pub designs: Arc<DesignService>,
    pub orders: Arc<OrderService>,
    /// 启动时缺失的配置项，`/ready` 据此判断是否就绪
    pub missing_settings: Arc<Vec<&'static str>>,
}

impl AppState {
    /// 用给定的外部依赖组装服务
    pub fn new(ports: Ports, daily_generation_limit: u32) -> Self {
        let quota = Arc::new(QuotaService::new(ports.generations, daily_generation_limit));

        Self {
            authenticator: ports.authenticator,
            generation: Arc::new(GenerationService::new(ports.model, quota.clone())),
            quota,
            designs: Arc::new(DesignService::new(ports.designs.clone(), ports.images)),
            orders: Arc::new(OrderService::new(ports.orders, ports.designs)),
            missing_settings: Arc::new(Vec::new()),
        }
    }

    /// 按配置创建 Supabase / Gemini 客户端并组装状态
    pub fn from_config(config: &AppConfig) -> Result<Self, ExternalError> {
        let supabase = SupabaseClient::new(&config.supabase)?;
        let gemini = GeminiClient::new(&config.gemini)?;
        let repository = Arc::new(SupabaseRepository::new(
            supabase.clone(),
            config.supabase.bucket.clone(),
        ));

        let authenticator: Arc<dyn Authenticator> = match config.supabase.auth_mode {
            AuthMode::Remote => Arc::new(SupabaseAuthenticator::new(supabase)),
            AuthMode::Jwt => {
                let secret = config
                    .supabase
                    .jwt_secret
                    .as_deref()
                    .filter(|s| !s.is_empty())
                    .ok_or_else(|| {
                        ExternalError::InvalidRequest(
                            "supabase.jwt_secret is required when auth_mode = jwt".to_string(),
                        )
                    })?;
                Arc::new(JwtAuthenticator::new(secret))
            }
        };
        info!(auth_mode = ?config.supabase.auth_mode, "Authenticator configured");

        let ports = Ports {
            authenticator,
            model: Arc::new(GeminiTextModel::new(gemini, &config.gemini)),
            designs: repository.clone(),
            orders: repository.clone(),
            generations: repository.clone(),
            images: repository,
        };

        let mut state = Self::new(ports, config.quota.daily_generations);
        state.missing_settings = Arc::new(config.missing_settings());
        Ok(state)
    }
}
