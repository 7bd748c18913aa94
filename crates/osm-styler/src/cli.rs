//! 命令行接口
//!
//! ```bash
//! osm-style --polygons areas.geojson --lines roads.geojson -o report.json
//! ```

use crate::algorithm::{ProcessingInputs, StyleOsmMapAlgorithm};
use crate::geojson::load_layer;
use crate::host::{ProcessingContext, TracingFeedback};
use crate::report::{LayerReport, StyleReport};
use anyhow::{Context, Result};
use clap::Parser;
use osm_style_shared::config::StylingConfig;
use std::path::PathBuf;
use tracing::info;

/// OSM prettymaps 样式工具
///
/// 读取面/线两个 GeoJSON 图层，套用 prettymaps 配色规则，输出各规则的命中报告。
#[derive(Parser, Debug)]
#[command(name = "osm-style")]
#[command(version, about = "OSM 图层 prettymaps 样式工具")]
pub struct Cli {
    /// 面图层（建筑、公园、水体）GeoJSON 文件
    #[arg(short, long)]
    pub polygons: PathBuf,

    /// 线图层（道路）GeoJSON 文件
    #[arg(short, long)]
    pub lines: PathBuf,

    /// 报告输出文件，缺省输出到标准输出
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 记录逐条件的规则评估追踪
    #[arg(long)]
    pub trace: bool,

    /// 日志级别 (trace, debug, info, warn, error)，覆盖配置文件
    #[arg(long)]
    pub log_level: Option<String>,
}

/// 加载图层、执行样式处理并生成报告
pub fn run(cli: &Cli, styling: &StylingConfig) -> Result<StyleReport> {
    let mut polygons = load_layer(&cli.polygons)
        .with_context(|| format!("无法加载面图层 {}", cli.polygons.display()))?;
    let mut lines = load_layer(&cli.lines)
        .with_context(|| format!("无法加载线图层 {}", cli.lines.display()))?;

    let algorithm = StyleOsmMapAlgorithm::from_config(styling)
        .context("配色方案无效")?
        .with_trace(cli.trace || styling.trace_rules);

    let summary = algorithm.process(
        ProcessingInputs::new(&mut polygons, &mut lines),
        &mut ProcessingContext::headless(),
        &mut TracingFeedback::new(),
    )?;

    Ok(StyleReport::new(summary, algorithm.scheme().background)
        .with_layer(LayerReport::from_layer(&polygons)?)
        .with_layer(LayerReport::from_layer(&lines)?))
}

/// 写出 JSON 报告
pub fn write_report(report: &StyleReport, output: Option<&PathBuf>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match output {
        Some(path) => {
            std::fs::write(path, json)
                .with_context(|| format!("无法写入报告 {}", path.display()))?;
            info!(path = %path.display(), "Report written");
        }
        None => println!("{}", json),
    }
    Ok(())
}
