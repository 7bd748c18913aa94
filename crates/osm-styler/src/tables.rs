//! 静态规则表
//!
//! 面要素：绿地 > 森林 > 水体 > 停车/步行广场 > 建筑色桶。
//! 线要素：14 级道路，按等级由高到低排列，最后一级兜底匹配任意 `highway`。

use crate::identifier::IdentifierField;
use crate::scheme::ColorScheme;
use crate::symbol::Symbol;
use rule_engine::{Condition, LogicalGroup, Rule, RuleNode, RuleTable};

pub const POLYGON_TABLE: &str = "polygons";
pub const LINE_TABLE: &str = "lines";

pub const BUILDING_FIELD: &str = "building";
pub const HIGHWAY_FIELD: &str = "highway";

/// 非建筑面要素的描边宽度
pub const AREA_STROKE_WIDTH: f64 = 0.3;
pub const BUILDING_STROKE_WIDTH: f64 = 0.15;

const GREEN_SPACE_TAGS: &[(&str, &str)] = &[
    ("landuse", "grass"),
    ("leisure", "park"),
    ("leisure", "garden"),
    ("natural", "island"),
    ("natural", "wood"),
    ("natural", "grassland"),
    ("landuse", "meadow"),
    ("landuse", "recreation_ground"),
];

const FOREST_TAGS: &[(&str, &str)] = &[
    ("landuse", "forest"),
    ("natural", "tree_row"),
    ("natural", "scrub"),
];

const WATER_TAGS: &[(&str, &str)] = &[
    ("natural", "water"),
    ("natural", "bay"),
    ("waterway", "river"),
    ("waterway", "stream"),
    ("waterway", "canal"),
    ("waterway", "drain"),
    ("landuse", "reservoir"),
    ("landuse", "basin"),
];

const PARKING_TAGS: &[(&str, &str)] = &[
    ("amenity", "parking"),
    ("highway", "pedestrian"),
    ("highway", "footway"),
    ("man_made", "pier"),
    ("leisure", "plaza"),
    ("place", "square"),
];

/// 道路等级
#[derive(Debug, Clone, Copy)]
pub struct RoadTier {
    pub name: &'static str,
    pub width: f64,
    /// 匹配的 highway 取值；为空表示兜底（任意非空 highway）
    pub highway: &'static [&'static str],
}

pub const ROAD_TIERS: [RoadTier; 14] = [
    RoadTier { name: "motorway", width: 1.2, highway: &["motorway", "motorway_link"] },
    RoadTier { name: "trunk", width: 1.1, highway: &["trunk", "trunk_link"] },
    RoadTier { name: "primary", width: 1.0, highway: &["primary", "primary_link"] },
    RoadTier { name: "secondary", width: 0.9, highway: &["secondary", "secondary_link"] },
    RoadTier { name: "tertiary", width: 0.8, highway: &["tertiary", "tertiary_link"] },
    RoadTier { name: "unclassified", width: 0.5, highway: &["unclassified"] },
    RoadTier { name: "living_street", width: 0.5, highway: &["living_street"] },
    RoadTier { name: "residential", width: 0.6, highway: &["residential"] },
    RoadTier { name: "service", width: 0.4, highway: &["service"] },
    RoadTier { name: "pedestrian", width: 0.4, highway: &["pedestrian"] },
    RoadTier { name: "footway", width: 0.3, highway: &["footway", "path"] },
    RoadTier { name: "cycleway", width: 0.3, highway: &["cycleway"] },
    RoadTier { name: "track", width: 0.3, highway: &["track"] },
    RoadTier { name: "other", width: 0.3, highway: &[] },
];

impl RoadTier {
    pub fn label(&self) -> String {
        format!("Street - {}", self.name)
    }

    pub fn filter(&self) -> RuleNode {
        if self.highway.is_empty() {
            Condition::is_not_null(HIGHWAY_FIELD).into()
        } else {
            LogicalGroup::any_eq(self.highway.iter().map(|v| (HIGHWAY_FIELD, *v))).into()
        }
    }
}

/// 建筑判定：`building` 非 null、非 'no'、非空串，且标识符落在指定色桶
pub fn building_filter(id_field: IdentifierField, buckets: u64, bucket: u64) -> RuleNode {
    LogicalGroup::and(vec![
        Condition::is_not_null(BUILDING_FIELD).into(),
        Condition::neq(BUILDING_FIELD, "no").into(),
        Condition::neq(BUILDING_FIELD, "").into(),
        Condition::mod_eq(id_field.field_name(), buckets, bucket).into(),
    ])
    .into()
}

/// 构建面要素规则表
pub fn polygon_rule_table(scheme: &ColorScheme, id_field: IdentifierField) -> RuleTable<Symbol> {
    let categories = [
        ("Green Spaces", GREEN_SPACE_TAGS, scheme.green),
        ("Forest", FOREST_TAGS, scheme.forest),
        ("Water", WATER_TAGS, scheme.water),
        ("Parking/Pedestrian", PARKING_TAGS, scheme.parking),
    ];

    let mut table = RuleTable::new(POLYGON_TABLE);
    for (label, tags, fill) in categories {
        table.push(Rule::new(
            label,
            LogicalGroup::any_eq(tags.iter().copied()),
            Symbol::fill(fill, scheme.edge, AREA_STROKE_WIDTH),
        ));
    }

    let buckets = scheme.buckets();
    for (i, color) in scheme.building_palette.iter().enumerate() {
        table.push(Rule::new(
            format!("Buildings {}", i + 1),
            building_filter(id_field, buckets, i as u64),
            Symbol::fill(*color, scheme.edge, BUILDING_STROKE_WIDTH),
        ));
    }

    table
}

/// 构建线要素（道路）规则表
pub fn line_rule_table(scheme: &ColorScheme) -> RuleTable<Symbol> {
    ROAD_TIERS.iter().fold(RuleTable::new(LINE_TABLE), |table, tier| {
        table.with_rule(Rule::new(
            tier.label(),
            tier.filter(),
            Symbol::round_line(scheme.streets, tier.width),
        ))
    })
}
