//! 共享库
//!
//! 包含所有服务共用的配置、错误处理、可观测性，以及 Supabase、Gemini 外部服务客户端。

pub mod config;
pub mod error;
pub mod gemini;
pub mod observability;
pub mod supabase;
