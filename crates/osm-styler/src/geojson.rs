//! GeoJSON 图层加载
//!
//! 只读取几何类型和属性，坐标不参与样式分类。

use crate::error::{Result, StyleError};
use crate::layer::{Feature, GeometryType};
use crate::memory::MemoryLayer;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    features: Vec<GeoFeature>,
}

#[derive(Debug, Deserialize)]
struct GeoFeature {
    #[serde(default)]
    id: Option<Value>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    properties: Option<Map<String, Value>>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    #[serde(rename = "type")]
    kind: String,
}

fn geometry_type(kind: &str) -> GeometryType {
    match kind {
        "Polygon" | "MultiPolygon" => GeometryType::Polygon,
        "LineString" | "MultiLineString" => GeometryType::Line,
        "Point" | "MultiPoint" => GeometryType::Point,
        _ => GeometryType::Unknown,
    }
}

/// 内部序号：所有要素都带互不相同的数值型 `id` 时使用该 id，
/// 否则整个图层改用集合中的位置，保证序号唯一
fn feature_ids(features: &[GeoFeature]) -> Vec<u64> {
    let numeric: Option<Vec<u64>> = features
        .iter()
        .map(|f| f.id.as_ref().and_then(Value::as_u64))
        .collect();

    match numeric {
        Some(ids) if ids.iter().collect::<HashSet<_>>().len() == ids.len() => ids,
        _ => (0..features.len() as u64).collect(),
    }
}

/// 从 GeoJSON 文本构建图层
pub fn parse_layer(name: &str, json: &str) -> Result<MemoryLayer> {
    let collection: FeatureCollection = serde_json::from_str(json)?;
    if collection.kind != "FeatureCollection" {
        return Err(StyleError::GeoJson(format!(
            "期望 FeatureCollection，实际为 {}",
            collection.kind
        )));
    }

    let kind = collection
        .features
        .iter()
        .find_map(|f| f.geometry.as_ref())
        .map(|g| geometry_type(&g.kind))
        .unwrap_or(GeometryType::Unknown);

    let ids = feature_ids(&collection.features);
    let mut layer = MemoryLayer::new(name, kind);
    for (id, feature) in ids.into_iter().zip(collection.features) {
        layer.push_feature(Feature::new(id, feature.properties.unwrap_or_default()));
    }

    debug!(
        layer = name,
        geometry = %kind,
        features = layer.features().len(),
        "Loaded GeoJSON layer"
    );
    Ok(layer)
}

/// 读取 GeoJSON 文件，图层名取文件名（不含扩展名）
pub fn load_layer(path: &Path) -> Result<MemoryLayer> {
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("layer")
        .to_string();
    let json = std::fs::read_to_string(path)?;
    parse_layer(&name, &json)
}
