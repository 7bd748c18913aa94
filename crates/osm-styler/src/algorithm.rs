//! prettymaps 样式处理算法
//!
//! 接收一个面图层和一个线图层，各自挂上编译好的规则渲染器，
//! 最后（可选）把画布背景设为底图色。

use crate::error::{Result, StyleError};
use crate::host::{Feedback, ProcessingContext};
use crate::identifier::IdentifierField;
use crate::layer::{GeometryType, VectorLayer};
use crate::renderer::RuleBasedRenderer;
use crate::scheme::ColorScheme;
use crate::symbol::Symbol;
use crate::tables::{line_rule_table, polygon_rule_table};
use osm_style_shared::config::StylingConfig;
use rule_engine::{CompiledTable, RuleCompiler, RuleExecutor};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

pub const POLYGON_LAYER: &str = "POLYGON_LAYER";
pub const LINE_LAYER: &str = "LINE_LAYER";

pub const STATUS_SUCCESS: &str = "Success";

/// 算法输入参数定义
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub geometry_type: GeometryType,
}

pub const PARAMETERS: [ParameterDefinition; 2] = [
    ParameterDefinition {
        name: POLYGON_LAYER,
        description: "Polygon Layer (buildings, parks, water)",
        geometry_type: GeometryType::Polygon,
    },
    ParameterDefinition {
        name: LINE_LAYER,
        description: "Line Layer (streets/roads)",
        geometry_type: GeometryType::Line,
    },
];

/// 输入图层，缺失时为 None
#[derive(Default)]
pub struct ProcessingInputs<'a> {
    pub polygon_layer: Option<&'a mut dyn VectorLayer>,
    pub line_layer: Option<&'a mut dyn VectorLayer>,
}

impl<'a> ProcessingInputs<'a> {
    pub fn new(polygons: &'a mut dyn VectorLayer, lines: &'a mut dyn VectorLayer) -> Self {
        Self {
            polygon_layer: Some(polygons),
            line_layer: Some(lines),
        }
    }
}

/// 处理结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct StyleSummary {
    pub status: String,
    pub polygon_layer: String,
    pub line_layer: String,
    pub polygon_rules: usize,
    pub line_rules: usize,
}

/// 样式算法
#[derive(Debug, Clone)]
pub struct StyleOsmMapAlgorithm {
    scheme: ColorScheme,
    trace_rules: bool,
    set_canvas_background: bool,
}

impl Default for StyleOsmMapAlgorithm {
    fn default() -> Self {
        Self::new(ColorScheme::prettymaps())
    }
}

impl StyleOsmMapAlgorithm {
    pub fn new(scheme: ColorScheme) -> Self {
        Self {
            scheme,
            trace_rules: false,
            set_canvas_background: true,
        }
    }

    pub fn from_config(config: &StylingConfig) -> Result<Self> {
        Ok(Self {
            scheme: ColorScheme::try_from(&config.palette)?,
            trace_rules: config.trace_rules,
            set_canvas_background: config.set_canvas_background,
        })
    }

    pub fn with_trace(mut self, enabled: bool) -> Self {
        self.trace_rules = enabled;
        self
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn name(&self) -> &'static str {
        "style_osm_prettymaps"
    }

    pub fn display_name(&self) -> &'static str {
        "Style OSM Map (Prettymaps)"
    }

    pub fn group(&self) -> &'static str {
        "Cartography"
    }

    pub fn group_id(&self) -> &'static str {
        "cartography"
    }

    pub fn parameters(&self) -> &'static [ParameterDefinition] {
        &PARAMETERS
    }

    pub fn short_help(&self) -> &'static str {
        "Apply prettymaps-inspired styling to OSM layers.\n\n\
         Polygon layer: buildings (alternating palette), parks, water, forests, parking, plazas.\n\
         Line layer: streets with widths by road type (14 road types).\n\n\
         Requires OSM attributes: building, landuse, natural, leisure, amenity, waterway \
         on polygons and highway on lines."
    }

    /// 执行样式处理
    ///
    /// 任一图层缺失时在构建规则前返回 [`StyleError::InvalidInput`]。
    #[instrument(skip_all, fields(algorithm = self.name()))]
    pub fn process(
        &self,
        inputs: ProcessingInputs<'_>,
        context: &mut ProcessingContext<'_>,
        feedback: &mut dyn Feedback,
    ) -> Result<StyleSummary> {
        let (Some(polygons), Some(lines)) = (inputs.polygon_layer, inputs.line_layer) else {
            return Err(StyleError::InvalidInput("Invalid input layers".to_string()));
        };

        feedback.push_info(&format!("Styling polygon layer: {}", polygons.name()));
        feedback.push_info(&format!("Styling line layer: {}", lines.name()));

        feedback.push_info("\n--- Styling Polygons ---");
        let polygon_rules = self.style_polygons(polygons, feedback)?;

        if feedback.is_canceled() {
            warn!("Styling canceled after polygon pass");
            return Err(StyleError::Canceled);
        }

        feedback.push_info("\n--- Styling Lines ---");
        let line_rules = self.style_lines(lines, feedback)?;

        if self.set_canvas_background {
            if let Some(canvas) = context.canvas.as_deref_mut() {
                canvas.set_canvas_color(self.scheme.background);
                canvas.refresh();
            }
        }

        let rule = "=".repeat(50);
        feedback.push_info(&format!("\n{}", rule));
        feedback.push_info("✓ STYLING COMPLETE!");
        feedback.push_info(&rule);
        info!(
            polygon_layer = %polygons.name(),
            line_layer = %lines.name(),
            polygon_rules,
            line_rules,
            "样式处理完成"
        );

        Ok(StyleSummary {
            status: STATUS_SUCCESS.to_string(),
            polygon_layer: polygons.name().to_string(),
            line_layer: lines.name().to_string(),
            polygon_rules,
            line_rules,
        })
    }

    fn style_polygons(
        &self,
        layer: &mut dyn VectorLayer,
        feedback: &mut dyn Feedback,
    ) -> Result<usize> {
        let id_field = IdentifierField::resolve(layer.fields());
        debug!(layer = %layer.name(), id_field = %id_field, "建筑分桶标识字段");

        let table = RuleCompiler::compile(polygon_rule_table(&self.scheme, id_field))?;
        let count = self.attach(layer, table, GeometryType::Polygon)?;
        feedback.push_info(&format!("  ✓ Applied {} polygon rules", count));
        Ok(count)
    }

    fn style_lines(&self, layer: &mut dyn VectorLayer, feedback: &mut dyn Feedback) -> Result<usize> {
        let table = RuleCompiler::compile(line_rule_table(&self.scheme))?;
        let count = self.attach(layer, table, GeometryType::Line)?;
        feedback.push_info(&format!("  ✓ Applied {} line rules", count));
        Ok(count)
    }

    fn attach(
        &self,
        layer: &mut dyn VectorLayer,
        table: CompiledTable<Symbol>,
        expected: GeometryType,
    ) -> Result<usize> {
        let actual = layer.geometry_type();
        if actual != expected && actual != GeometryType::Unknown {
            warn!(
                layer = %layer.name(),
                expected = %expected,
                actual = %actual,
                "图层几何类型与参数不符"
            );
        }

        let missing = table.missing_fields(layer.fields());
        if !missing.is_empty() {
            debug!(layer = %layer.name(), missing = ?missing, "图层缺少规则引用的字段");
        }

        let count = table.len();
        let mut executor = RuleExecutor::new();
        if self.trace_rules {
            executor = executor.with_trace();
        }

        layer.set_renderer(RuleBasedRenderer::new(table).with_executor(executor));
        layer.trigger_repaint();
        Ok(count)
    }
}
