//! 测试环境管理
//!
//! 每个测试使用独立的临时目录存放图层、配置和报告。

use anyhow::Result;
use osm_style_shared::config::AppConfig;
use serde_json::Value;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use super::data::{neighbourhood_lines, neighbourhood_polygons};

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

pub const SERVICE_NAME: &str = "osm-styler";

pub struct TestEnvironment {
    pub dir: PathBuf,
    pub polygons: PathBuf,
    pub lines: PathBuf,
    pub report: PathBuf,
}

impl TestEnvironment {
    /// 创建临时目录并写入默认街区数据
    pub fn setup() -> Result<Self> {
        let dir = std::env::temp_dir().join(format!(
            "osm-style-e2e-{}-{}",
            std::process::id(),
            NEXT_ID.fetch_add(1, Ordering::SeqCst)
        ));
        std::fs::create_dir_all(&dir)?;

        let env = Self {
            polygons: dir.join("areas.geojson"),
            lines: dir.join("roads.geojson"),
            report: dir.join("report.json"),
            dir,
        };
        env.write_json(&env.polygons, &neighbourhood_polygons())?;
        env.write_json(&env.lines, &neighbourhood_lines())?;
        Ok(env)
    }

    pub fn write_json(&self, path: &Path, value: &Value) -> Result<()> {
        std::fs::write(path, serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// 写入服务配置文件
    pub fn write_config(&self, toml: &str) -> Result<()> {
        std::fs::write(self.dir.join(format!("{}.toml", SERVICE_NAME)), toml)?;
        Ok(())
    }

    pub fn load_config(&self) -> Result<AppConfig> {
        Ok(AppConfig::load_from(&self.dir, SERVICE_NAME)?)
    }

    pub fn read_report(&self) -> Result<Value> {
        Ok(serde_json::from_str(&std::fs::read_to_string(&self.report)?)?)
    }

    /// 命令行参数
    pub fn args(&self) -> Vec<String> {
        vec![
            "osm-style".to_string(),
            "--polygons".to_string(),
            self.polygons.display().to_string(),
            "--lines".to_string(),
            self.lines.display().to_string(),
            "--output".to_string(),
            self.report.display().to_string(),
        ]
    }

    pub fn cleanup(self) -> Result<()> {
        std::fs::remove_dir_all(&self.dir)?;
        Ok(())
    }
}
