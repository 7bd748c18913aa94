//! 建筑分桶所用的要素标识符
//!
//! 每个图层只解析一次：优先 `osm_id`，其次 `fid`，最后退回要素内部序号 `$id`。
//! 不同导入管线暴露的字段不同，同一真实建筑在不同数据源中可能落入不同的色桶。

use rule_engine::FEATURE_ID_FIELD;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierField {
    /// OSM 对象 id（QuickOSM、Overpass 导出）
    OsmId,
    /// 通用记录 id（GeoPackage 等）
    Fid,
    /// 图层内部序号
    Internal,
}

impl IdentifierField {
    /// 按字段列表选择优先级最高的标识符
    pub fn resolve<S: AsRef<str>>(fields: &[S]) -> Self {
        let has = |name: &str| fields.iter().any(|f| f.as_ref() == name);

        if has("osm_id") {
            IdentifierField::OsmId
        } else if has("fid") {
            IdentifierField::Fid
        } else {
            IdentifierField::Internal
        }
    }

    /// 规则条件中引用的字段名
    pub fn field_name(&self) -> &'static str {
        match self {
            IdentifierField::OsmId => "osm_id",
            IdentifierField::Fid => "fid",
            IdentifierField::Internal => FEATURE_ID_FIELD,
        }
    }
}

impl fmt::Display for IdentifierField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field_name())
    }
}
