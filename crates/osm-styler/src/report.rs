//! 样式报告
//!
//! 命令行输出：处理结果 + 每个图层各规则命中的要素数。

use crate::algorithm::StyleSummary;
use crate::color::Color;
use crate::error::Result;
use crate::layer::{GeometryType, VectorLayer};
use crate::memory::MemoryLayer;
use crate::symbol::PaintState;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct StyleReport {
    pub generated_at: DateTime<Utc>,
    pub summary: StyleSummary,
    pub background: Color,
    pub layers: Vec<LayerReport>,
}

impl StyleReport {
    pub fn new(summary: StyleSummary, background: Color) -> Self {
        Self {
            generated_at: Utc::now(),
            summary,
            background,
            layers: Vec::new(),
        }
    }

    pub fn with_layer(mut self, layer: LayerReport) -> Self {
        self.layers.push(layer);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerReport {
    pub name: String,
    pub geometry_type: GeometryType,
    pub features: usize,
    /// 未命中任何规则、沿用默认样式的要素数
    pub unmatched: usize,
    pub rules: Vec<RuleReport>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleReport {
    pub label: String,
    pub features: usize,
    pub paint: PaintState,
}

impl LayerReport {
    /// 按图层当前渲染器统计；未挂渲染器时所有要素都算未命中
    pub fn from_layer(layer: &MemoryLayer) -> Result<Self> {
        let features = layer.features().len();
        let Some(renderer) = layer.renderer() else {
            return Ok(Self {
                name: layer.name().to_string(),
                geometry_type: layer.geometry_type(),
                features,
                unmatched: features,
                rules: Vec::new(),
            });
        };

        let stats = renderer.hit_stats(layer.features())?;
        let rules = stats
            .hits
            .into_iter()
            .zip(renderer.table().rules())
            .map(|(hit, rule)| RuleReport {
                label: hit.label,
                features: hit.count,
                paint: PaintState::of(&rule.symbol),
            })
            .collect();

        Ok(Self {
            name: layer.name().to_string(),
            geometry_type: layer.geometry_type(),
            features: stats.total,
            unmatched: stats.unmatched,
            rules,
        })
    }
}
