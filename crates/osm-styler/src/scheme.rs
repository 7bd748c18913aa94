//! 配色方案

use crate::color::Color;
use crate::error::{Result, StyleError};
use osm_style_shared::config::PaletteConfig;
use serde::Serialize;

/// 两张规则表共用的颜色集合
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScheme {
    pub background: Color,
    pub green: Color,
    pub forest: Color,
    pub water: Color,
    pub parking: Color,
    pub streets: Color,
    pub edge: Color,
    /// 建筑交替色，要素按标识符对其长度取模选色
    pub building_palette: Vec<Color>,
}

impl ColorScheme {
    /// prettymaps 风格：奶油色底图、橙红色系建筑
    pub fn prettymaps() -> Self {
        Self {
            background: Color::rgb(0xF2, 0xF4, 0xCB),
            green: Color::rgb(0xD0, 0xF1, 0xBF),
            forest: Color::rgb(0x64, 0xB9, 0x6A),
            water: Color::rgb(0xA1, 0xE3, 0xFF),
            parking: Color::rgb(0xF2, 0xF4, 0xCB),
            streets: Color::rgb(0x2F, 0x37, 0x37),
            edge: Color::rgb(0x2F, 0x37, 0x37),
            building_palette: vec![
                Color::rgb(0xFF, 0xC8, 0x57),
                Color::rgb(0xE9, 0x72, 0x4C),
                Color::rgb(0xC5, 0x28, 0x3D),
            ],
        }
    }

    pub fn buckets(&self) -> u64 {
        self.building_palette.len() as u64
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::prettymaps()
    }
}

impl TryFrom<&PaletteConfig> for ColorScheme {
    type Error = StyleError;

    fn try_from(config: &PaletteConfig) -> Result<Self> {
        if config.building_palette.is_empty() {
            return Err(StyleError::InvalidScheme(
                "building_palette 至少需要一种颜色".to_string(),
            ));
        }

        Ok(Self {
            background: config.background.parse()?,
            green: config.green.parse()?,
            forest: config.forest.parse()?,
            water: config.water.parse()?,
            parking: config.parking.parse()?,
            streets: config.streets.parse()?,
            edge: config.edge.parse()?,
            building_palette: config
                .building_palette
                .iter()
                .map(|c| c.parse())
                .collect::<Result<Vec<Color>>>()?,
        })
    }
}
