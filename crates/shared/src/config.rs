//! 配置管理模块
//!
//! 支持多层配置文件加载，环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PRETTYMAPS";

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}

/// 配色方案（十六进制颜色字符串）
///
/// 默认值为 prettymaps 风格：奶油色底图、橙红色系建筑。
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteConfig {
    pub background: String,
    pub green: String,
    pub forest: String,
    pub water: String,
    pub parking: String,
    pub streets: String,
    pub edge: String,
    pub building_palette: Vec<String>,
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            background: "#F2F4CB".to_string(),
            green: "#D0F1BF".to_string(),
            forest: "#64B96A".to_string(),
            water: "#A1E3FF".to_string(),
            parking: "#F2F4CB".to_string(),
            streets: "#2F3737".to_string(),
            edge: "#2F3737".to_string(),
            building_palette: vec![
                "#FFC857".to_string(),
                "#E9724C".to_string(),
                "#C5283D".to_string(),
            ],
        }
    }
}

/// 样式配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StylingConfig {
    pub palette: PaletteConfig,
    /// 是否在样式完成后设置画布背景色
    pub set_canvas_background: bool,
    /// 是否记录逐条件的评估追踪（调试用）
    pub trace_rules: bool,
}

impl Default for StylingConfig {
    fn default() -> Self {
        Self {
            palette: PaletteConfig::default(),
            set_canvas_background: true,
            trace_rules: false,
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub styling: StylingConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 从配置文件和环境变量加载配置
    ///
    /// 配置目录由 `CONFIG_DIR` 指定，默认 `config`；环境名由 `PRETTYMAPS_ENV` 指定，
    /// 默认 `development`。
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let config_dir = std::env::var("CONFIG_DIR").unwrap_or_else(|_| "config".to_string());
        Self::load_from(Path::new(&config_dir), service_name)
    }

    /// 从指定目录加载配置
    ///
    /// 加载顺序（后加载的会覆盖先加载的同名配置项）：
    /// 1. {dir}/default.toml（默认配置）
    /// 2. {dir}/{environment}.toml（环境特定配置）
    /// 3. {dir}/{service_name}.toml（服务特定配置）
    /// 4. 环境变量（PRETTYMAPS_ 前缀，层级用双下划线分隔，
    ///    如 PRETTYMAPS_STYLING__PALETTE__WATER -> styling.palette.water）
    pub fn load_from(config_dir: &Path, service_name: &str) -> Result<Self, ConfigError> {
        let env = std::env::var(format!("{}_ENV", ENV_PREFIX))
            .unwrap_or_else(|_| "development".to_string());

        let builder = Config::builder()
            .set_default("service_name", service_name)?
            .set_default("environment", env.clone())?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            .add_source(File::from(config_dir.join(format!("{}.toml", env))).required(false))
            .add_source(
                File::from(config_dir.join(format!("{}.toml", service_name))).required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("styling.palette.building_palette")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// 是否为生产环境
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "osm-style-config-{}-{}",
            name,
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.observability.log_level, "info");
        assert!(!config.observability.json_logs());
        assert_eq!(config.styling.palette.building_palette.len(), 3);
        assert!(config.styling.set_canvas_background);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let dir = scratch_dir("empty");
        let config = AppConfig::load_from(&dir, "osm-styler").unwrap();

        assert_eq!(config.service_name, "osm-styler");
        assert_eq!(config.styling.palette, PaletteConfig::default());
        assert!(!config.styling.trace_rules);
    }

    #[test]
    fn test_service_file_overrides_defaults() {
        let dir = scratch_dir("override");
        fs::write(
            dir.join("default.toml"),
            r##"
            [observability]
            log_format = "json"

            [styling.palette]
            water = "#0000FF"
            "##,
        )
        .unwrap();
        fs::write(
            dir.join("osm-styler.toml"),
            r##"
            [styling]
            trace_rules = true

            [styling.palette]
            building_palette = ["#111111", "#222222"]
            "##,
        )
        .unwrap();

        let config = AppConfig::load_from(&dir, "osm-styler").unwrap();

        assert!(config.observability.json_logs());
        assert_eq!(config.observability.log_level, "info");
        assert!(config.styling.trace_rules);
        assert_eq!(config.styling.palette.water, "#0000FF");
        assert_eq!(config.styling.palette.green, "#D0F1BF");
        assert_eq!(
            config.styling.palette.building_palette,
            vec!["#111111".to_string(), "#222222".to_string()]
        );
    }
}
