//! osm-style 端到端测试
//!
//! 测试覆盖完整的命令行流程：
//! - GeoJSON 图层加载
//! - 配置文件覆盖配色方案
//! - 两张规则表挂载与要素分类
//! - JSON 报告输出

pub mod data;
pub mod setup;
pub mod suites;

pub use setup::TestEnvironment;
