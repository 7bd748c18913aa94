//! 内存宿主适配器
//!
//! 命令行和测试使用的图层/画布实现。

use crate::color::Color;
use crate::host::MapCanvas;
use crate::layer::{Feature, GeometryType, VectorLayer};
use crate::renderer::RuleBasedRenderer;
use serde_json::{Map, Value};

/// 内存图层
#[derive(Debug, Clone)]
pub struct MemoryLayer {
    name: String,
    geometry_type: GeometryType,
    fields: Vec<String>,
    features: Vec<Feature>,
    renderer: Option<RuleBasedRenderer>,
    repaint_count: usize,
}

impl MemoryLayer {
    pub fn new(name: impl Into<String>, geometry_type: GeometryType) -> Self {
        Self {
            name: name.into(),
            geometry_type,
            fields: Vec::new(),
            features: Vec::new(),
            renderer: None,
            repaint_count: 0,
        }
    }

    /// 声明字段（重复字段忽略）
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.add_field(field.into());
        self
    }

    /// 追加要素，内部序号按插入顺序自增
    pub fn with_feature(mut self, attributes: Value) -> Self {
        let attributes = match attributes {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let id = self.features.len() as u64;
        self.push_feature(Feature::new(id, attributes));
        self
    }

    /// 追加要素，属性中出现的新字段并入字段列表
    pub fn push_feature(&mut self, feature: Feature) {
        let keys: Vec<String> = feature.attributes.keys().cloned().collect();
        for key in keys {
            self.add_field(key);
        }
        self.features.push(feature);
    }

    fn add_field(&mut self, field: String) {
        if !self.fields.contains(&field) {
            self.fields.push(field);
        }
    }

    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    pub fn renderer(&self) -> Option<&RuleBasedRenderer> {
        self.renderer.as_ref()
    }

    pub fn repaint_count(&self) -> usize {
        self.repaint_count
    }
}

impl VectorLayer for MemoryLayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn geometry_type(&self) -> GeometryType {
        self.geometry_type
    }

    fn fields(&self) -> &[String] {
        &self.fields
    }

    fn set_renderer(&mut self, renderer: RuleBasedRenderer) {
        self.renderer = Some(renderer);
    }

    fn trigger_repaint(&mut self) {
        self.repaint_count += 1;
    }
}

/// 记录背景色与刷新次数的画布
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    pub background: Option<Color>,
    pub refresh_count: usize,
}

impl MapCanvas for RecordingCanvas {
    fn set_canvas_color(&mut self, color: Color) {
        self.background = Some(color);
    }

    fn refresh(&mut self) {
        self.refresh_count += 1;
    }
}
