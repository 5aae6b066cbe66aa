//! 中间件模块

pub mod auth;
pub mod security;

pub use auth::require_auth;
pub use security::security_headers;
