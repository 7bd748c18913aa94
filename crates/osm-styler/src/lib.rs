//! OSM prettymaps 样式
//!
//! 为 OSM 面图层和线图层生成有序规则表（先命中者生效），并通过抽象的
//! [`Renderer`] 接口把符号交给宿主绘制。
//!
//! ## 模块
//!
//! - `tables`: 面/线两张静态规则表
//! - `algorithm`: 样式处理算法
//! - `renderer`: 基于规则表的渲染器
//! - `memory` / `geojson`: 内存宿主适配器与 GeoJSON 加载

pub mod algorithm;
pub mod cli;
pub mod color;
pub mod error;
pub mod geojson;
pub mod host;
pub mod identifier;
pub mod layer;
pub mod memory;
pub mod renderer;
pub mod report;
pub mod scheme;
pub mod symbol;
pub mod tables;

pub use algorithm::{ProcessingInputs, StyleOsmMapAlgorithm, StyleSummary};
pub use color::Color;
pub use error::{Result, StyleError};
pub use host::{Feedback, MapCanvas, ProcessingContext, TracingFeedback};
pub use identifier::IdentifierField;
pub use layer::{Feature, GeometryType, VectorLayer};
pub use memory::{MemoryLayer, RecordingCanvas};
pub use renderer::RuleBasedRenderer;
pub use scheme::ColorScheme;
pub use symbol::{CapStyle, FillSymbol, JoinStyle, LineSymbol, PaintState, Renderer, Symbol};
