//! AI 设计 T 恤商城后端服务
//!
//! 提供设计图生成、作品保存与展示、下单等 REST API。
//!
//! ## 核心功能
//!
//! - **设计生成**：根据提示词调用 Gemini 生成 SVG 设计图，按用户每日配额限流
//! - **文本辅助**：提示词优化、商品名建议
//! - **作品管理**：上传设计图到 Supabase Storage 并写入作品记录，公开画廊与商品详情
//! - **下单**：校验尺码与作品后创建订单
//! - **商品目录**：尺码、底色、尺码表
//!
//! ## 模块结构
//!
//! - `auth`: 会话校验（Supabase 远程校验或本地 JWT 校验）
//! - `dto`: 请求和响应的数据传输对象
//! - `models`: 数据表行与目录常量
//! - `generation`: 模型接口、提示词模板、SVG 清洗
//! - `repository`: 数据访问接口及 Supabase 实现
//! - `service`: 业务逻辑
//! - `handlers`: HTTP 请求处理器
//! - `middleware`: 认证与安全头中间件
//! - `routes`: 路由配置
//! - `state`: 应用状态
//!
//! ## 技术栈
//!
//! - Web 框架：Axum
//! - 数据验证：validator
//! - 序列化：serde (camelCase)

pub mod auth;
pub mod dto;
pub mod error;
pub mod generation;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;

// 重新导出核心类型
pub use auth::AuthUser;
pub use dto::ApiResponse;
pub use error::{Result, ShopError};
pub use models::{Design, Order, OrderStatus, ShirtSize};
pub use state::{AppState, Ports};
