//! 配置管理模块
//!
//! 支持多格式配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// 服务配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 单个请求的处理超时（秒），覆盖上游 AI 调用的耗时
    pub request_timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_seconds: 90,
        }
    }
}

/// 用户会话校验方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AuthMode {
    /// 每个请求调用 Supabase `/auth/v1/user` 校验
    #[default]
    Remote,
    /// 使用项目 JWT 密钥在本地校验 access token
    Jwt,
}

/// Supabase 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SupabaseConfig {
    /// 项目地址，如 https://xyzcompany.supabase.co
    pub url: String,
    pub anon_key: String,
    /// 服务端写表和上传文件使用的 service role key
    pub service_role_key: String,
    /// 设计图存储桶
    pub bucket: String,
    /// 仅 `auth_mode = jwt` 时需要
    pub jwt_secret: Option<String>,
    pub auth_mode: AuthMode,
    pub timeout_seconds: u64,
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: "http://localhost:54321".to_string(),
            anon_key: String::new(),
            service_role_key: String::new(),
            bucket: "tshirt-designs".to_string(),
            jwt_secret: None,
            auth_mode: AuthMode::Remote,
            timeout_seconds: 15,
        }
    }
}

impl SupabaseConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Gemini 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GeminiConfig {
    pub base_url: String,
    /// 图片生成使用的 key
    pub api_key: String,
    /// 提示词优化和命名建议使用的 key，未配置时回退到 `api_key`
    pub lite_api_key: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            api_key: String::new(),
            lite_api_key: None,
            model: "gemini-2.5-flash".to_string(),
            timeout_seconds: 60,
        }
    }
}

impl GeminiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// 轻量调用实际使用的 key
    pub fn effective_lite_key(&self) -> &str {
        self.lite_api_key
            .as_deref()
            .filter(|k| !k.is_empty())
            .unwrap_or(&self.api_key)
    }
}

/// 生成配额配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuotaConfig {
    /// 每个用户每个 UTC 自然日允许的成功生成次数，0 表示禁止生成
    pub daily_generations: u32,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            daily_generations: 10,
        }
    }
}

/// CORS 配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 逗号分隔的来源列表，`*` 表示允许所有来源
    pub allowed_origins: String,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: "http://localhost:3000".to_string(),
        }
    }
}

impl CorsConfig {
    pub fn origins(&self) -> Vec<String> {
        self.allowed_origins
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect()
    }

    pub fn allows_any(&self) -> bool {
        self.allowed_origins.trim() == "*"
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// 服务名称，用于标识日志和指标的来源
    pub service_name: String,
    pub log_level: String,
    /// 是否启用 JSON 格式日志
    pub json_logs: bool,
    pub metrics_enabled: bool,
    pub metrics_port: u16,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: "unknown-service".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
            metrics_enabled: true,
            metrics_port: 9090,
        }
    }
}

impl ObservabilityConfig {
    /// 注入服务名
    pub fn with_service_name(mut self, service_name: &str) -> Self {
        self.service_name = service_name.to_string();
        self
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub server: ServerConfig,
    pub supabase: SupabaseConfig,
    pub gemini: GeminiConfig,
    pub quota: QuotaConfig,
    pub cors: CorsConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. `.env` 文件（仅本地开发，存在时加载）
    /// 2. config/default.toml（默认配置）
    /// 3. config/{environment}.toml（环境特定配置）
    /// 4. config/{service_name}.toml（服务特定配置）
    /// 5. 环境变量（VISION_ 前缀，层级用双下划线，如 VISION_SUPABASE__URL -> supabase.url）
    /// 6. 服务端口环境变量（如 STOREFRONT_PORT）
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        // .env 不存在是正常情况
        let _ = dotenvy::dotenv();

        let env = std::env::var("VISION_ENV").unwrap_or_else(|_| "development".to_string());
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

        let mut config = Self::load_from(
            service_name,
            &env,
            Path::new(&config_dir),
            Self::env_source(),
        )?;

        if let Some(port) = Self::service_port_from_env(service_name) {
            config.server.port = port;
        }

        Ok(config)
    }

    /// `VISION_` 前缀、双下划线分层的环境变量源
    fn env_source() -> Environment {
        Environment::with_prefix("VISION")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true)
    }

    /// 按给定目录和环境变量源构建配置，任一来源无法解析时返回错误
    fn load_from(
        service_name: &str,
        env: &str,
        config_dir: &Path,
        env_source: Environment,
    ) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(env_source)
            .build()?
            .try_deserialize()
    }

    /// 将服务名转换为端口环境变量名
    ///
    /// "storefront-service" -> "STOREFRONT_PORT"，其余服务名 -> "{NAME}_PORT"
    fn port_env_var(service_name: &str) -> String {
        let base = service_name
            .strip_suffix("-service")
            .unwrap_or(service_name);
        format!("{}_PORT", base.to_uppercase().replace('-', "_"))
    }

    fn service_port_from_env(service_name: &str) -> Option<u16> {
        std::env::var(Self::port_env_var(service_name))
            .ok()
            .and_then(|v| v.parse().ok())
    }

    /// 获取服务地址
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    /// 检查运行所需的密钥是否齐全，返回缺失项
    pub fn missing_settings(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.supabase.url.is_empty() {
            missing.push("supabase.url");
        }
        if self.supabase.anon_key.is_empty() {
            missing.push("supabase.anon_key");
        }
        if self.supabase.service_role_key.is_empty() {
            missing.push("supabase.service_role_key");
        }
        if self.supabase.auth_mode == AuthMode::Jwt
            && self.supabase.jwt_secret.as_deref().unwrap_or("").is_empty()
        {
            missing.push("supabase.jwt_secret");
        }
        if self.gemini.api_key.is_empty() {
            missing.push("gemini.api_key");
        }
        missing
    }
}
