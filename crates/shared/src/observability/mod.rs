//! 统一可观测性模块
//!
//! 所有入口（CLI、测试）通过单一入口点初始化日志，确保一致的输出格式。

pub mod tracing;

pub use crate::config::ObservabilityConfig;
pub use self::tracing::init;
