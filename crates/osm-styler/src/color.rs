//! RGBA 颜色

use crate::error::StyleError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA 颜色，序列化为十六进制字符串
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }
}

impl FromStr for Color {
    type Err = StyleError;

    /// 解析 `#RGB`、`#RRGGBB`、`#RRGGBBAA`，`#` 可省略
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| StyleError::InvalidColor {
            value: s.to_string(),
            reason: reason.to_string(),
        };

        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(invalid("非 ASCII 字符"));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| invalid("非法的十六进制数字"))
        };
        let short = |i: usize| channel(i..i + 1).map(|v| v * 17);

        match hex.len() {
            3 => Ok(Self::rgb(short(0)?, short(1)?, short(2)?)),
            6 => Ok(Self::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Self::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(invalid("长度必须为 3、6 或 8 位")),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02X}", self.a)?;
        }
        Ok(())
    }
}

impl TryFrom<String> for Color {
    type Error = StyleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}
