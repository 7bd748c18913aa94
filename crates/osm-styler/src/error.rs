//! 样式工具错误类型

use rule_engine::RuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    /// 输入图层缺失，在构建任何规则之前抛出
    #[error("无效的输入图层: {0}")]
    InvalidInput(String),

    #[error("样式处理已取消")]
    Canceled,

    #[error("无效的颜色 '{value}': {reason}")]
    InvalidColor { value: String, reason: String },

    #[error("无效的配色方案: {0}")]
    InvalidScheme(String),

    #[error("GeoJSON 解析失败: {0}")]
    GeoJson(String),

    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),
}

impl StyleError {
    /// 获取错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Canceled => "CANCELED",
            Self::InvalidColor { .. } => "INVALID_COLOR",
            Self::InvalidScheme(_) => "INVALID_SCHEME",
            Self::GeoJson(_) => "GEOJSON_ERROR",
            Self::Rule(_) => "RULE_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Json(_) => "JSON_ERROR",
        }
    }
}

pub type Result<T> = std::result::Result<T, StyleError>;
