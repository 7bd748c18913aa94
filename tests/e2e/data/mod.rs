//! 测试数据 Fixtures
//!
//! 一个小街区：几栋建筑、一片公园、一条河和几条道路。

use serde_json::{Value, json};

fn polygon(properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "Polygon", "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]},
        "properties": properties
    })
}

fn line(properties: Value) -> Value {
    json!({
        "type": "Feature",
        "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]},
        "properties": properties
    })
}

/// 面图层：QuickOSM 风格，带 osm_id
pub fn neighbourhood_polygons() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            polygon(json!({"osm_id": 30, "building": "yes"})),
            polygon(json!({"osm_id": 31, "building": "apartments"})),
            polygon(json!({"osm_id": 32, "building": "retail"})),
            polygon(json!({"osm_id": 40, "leisure": "park", "name": "Riverside Park"})),
            polygon(json!({"osm_id": 41, "waterway": "river", "natural": null})),
            polygon(json!({"osm_id": 42, "amenity": "parking"})),
            polygon(json!({"osm_id": 43, "building": "no", "amenity": "school"}))
        ]
    })
}

/// 线图层：不带任何标识字段
pub fn neighbourhood_lines() -> Value {
    json!({
        "type": "FeatureCollection",
        "features": [
            line(json!({"highway": "primary", "name": "High Street"})),
            line(json!({"highway": "residential"})),
            line(json!({"highway": "residential"})),
            line(json!({"highway": "footway"})),
            line(json!({"railway": "rail"}))
        ]
    })
}
