//! 共享库
//!
//! 包含样式工具各入口共用的配置加载与日志初始化代码。

pub mod config;
pub mod observability;
