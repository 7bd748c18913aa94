//! 图层与要素
//!
//! [`VectorLayer`] 是宿主图层的抽象：算法只读取图层名和字段列表，
//! 再把编译好的 [`RuleBasedRenderer`] 交给图层并请求重绘。

use crate::renderer::RuleBasedRenderer;
use rule_engine::EvaluationContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 图层几何类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GeometryType {
    Polygon,
    Line,
    Point,
    Unknown,
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Polygon => "polygon",
            Self::Line => "line",
            Self::Point => "point",
            Self::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// 地图要素：内部序号 + 属性
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub id: u64,
    pub attributes: Map<String, Value>,
}

impl Feature {
    pub fn new(id: u64, attributes: Map<String, Value>) -> Self {
        Self { id, attributes }
    }

    /// 构造规则评估上下文
    pub fn context(&self) -> EvaluationContext<'_> {
        EvaluationContext::new(&self.attributes).with_feature_id(self.id)
    }
}

/// 宿主图层接口
pub trait VectorLayer {
    fn name(&self) -> &str;

    fn geometry_type(&self) -> GeometryType;

    /// 图层字段名列表
    fn fields(&self) -> &[String];

    /// 替换图层渲染器
    fn set_renderer(&mut self, renderer: RuleBasedRenderer);

    fn trigger_repaint(&mut self);
}
