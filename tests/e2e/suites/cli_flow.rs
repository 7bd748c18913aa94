//! 命令行全流程测试套件
//!
//! 从 GeoJSON 文件到 JSON 报告。

use crate::setup::TestEnvironment;
use clap::Parser;
use osm_styler::cli::{self, Cli};
use serde_json::{Value, json};

fn rule_counts(layer: &Value) -> Vec<u64> {
    layer["rules"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["features"].as_u64().unwrap())
        .collect()
}

#[cfg(test)]
mod report_tests {
    use super::*;

    #[test]
    fn test_default_styling_report() {
        let env = TestEnvironment::setup().unwrap();
        let cli = Cli::try_parse_from(env.args()).unwrap();
        let config = env.load_config().unwrap();

        let report = cli::run(&cli, &config.styling).unwrap();
        cli::write_report(&report, cli.output.as_ref()).unwrap();
        let json = env.read_report().unwrap();

        assert_eq!(json["summary"]["STATUS"], "Success");
        assert_eq!(json["summary"]["POLYGON_LAYER"], "areas");
        assert_eq!(json["summary"]["LINE_LAYER"], "roads");
        assert_eq!(json["summary"]["POLYGON_RULES"], 7);
        assert_eq!(json["summary"]["LINE_RULES"], 14);
        assert_eq!(json["background"], "#F2F4CB");

        let areas = &json["layers"][0];
        assert_eq!(areas["geometry_type"], "polygon");
        assert_eq!(areas["features"], 7);
        assert_eq!(areas["unmatched"], 1);
        // 绿地、森林、水体、停车、三个建筑色桶（osm_id 30/31/32）
        assert_eq!(rule_counts(areas), vec![1, 0, 1, 1, 1, 1, 1]);
        assert_eq!(areas["rules"][4]["paint"]["fill_color"], "#FFC857");
        assert_eq!(areas["rules"][4]["paint"]["line_width"], 0.15);

        let roads = &json["layers"][1];
        assert_eq!(roads["geometry_type"], "line");
        assert_eq!(roads["unmatched"], 1);
        let counts = rule_counts(roads);
        assert_eq!(counts[2], 1, "primary");
        assert_eq!(counts[7], 2, "residential");
        assert_eq!(counts[10], 1, "footway");
        assert_eq!(counts.iter().sum::<u64>(), 4);
        assert_eq!(roads["rules"][7]["paint"]["cap_style"], "round");

        env.cleanup().unwrap();
    }

    #[test]
    fn test_empty_layers_produce_empty_report() {
        let env = TestEnvironment::setup().unwrap();
        let empty = json!({"type": "FeatureCollection", "features": []});
        env.write_json(&env.polygons, &empty).unwrap();
        env.write_json(&env.lines, &empty).unwrap();

        let cli = Cli::try_parse_from(env.args()).unwrap();
        let report = cli::run(&cli, &env.load_config().unwrap().styling).unwrap();

        assert_eq!(report.summary.polygon_rules, 7);
        assert_eq!(report.layers[0].features, 0);
        assert!(report.layers.iter().all(|l| l.unmatched == 0));

        env.cleanup().unwrap();
    }
}

#[cfg(test)]
mod config_tests {
    use super::*;

    #[test]
    fn test_config_palette_overrides() {
        let env = TestEnvironment::setup().unwrap();
        env.write_config(
            r##"
            [styling.palette]
            background = "#FFFFFF"
            building_palette = ["#000000", "#333333"]
            "##,
        )
        .unwrap();

        let cli = Cli::try_parse_from(env.args()).unwrap();
        let config = env.load_config().unwrap();
        let report = cli::run(&cli, &config.styling).unwrap();

        assert_eq!(report.background.to_string(), "#FFFFFF");
        assert_eq!(report.summary.polygon_rules, 6);
        // osm_id 30/32 落在第一个色桶，31 落在第二个
        let buildings: Vec<usize> = report.layers[0].rules[4..]
            .iter()
            .map(|r| r.features)
            .collect();
        assert_eq!(buildings, vec![2, 1]);

        env.cleanup().unwrap();
    }

    #[test]
    fn test_invalid_palette_is_rejected() {
        let env = TestEnvironment::setup().unwrap();
        env.write_config(
            r##"
            [styling.palette]
            water = "blue"
            "##,
        )
        .unwrap();

        let cli = Cli::try_parse_from(env.args()).unwrap();
        let config = env.load_config().unwrap();
        let err = cli::run(&cli, &config.styling).unwrap_err();
        assert!(err.to_string().contains("配色方案无效"));

        env.cleanup().unwrap();
    }

    #[test]
    fn test_malformed_layer_file() {
        let env = TestEnvironment::setup().unwrap();
        std::fs::write(&env.lines, "{ not geojson").unwrap();

        let cli = Cli::try_parse_from(env.args()).unwrap();
        let err = cli::run(&cli, &Default::default()).unwrap_err();
        assert!(err.to_string().contains("无法加载线图层"));

        env.cleanup().unwrap();
    }
}
