//! 符号与渲染接口
//!
//! [`Renderer`] 是与宿主绘制能力之间的接缝：规则表只产出声明式的 [`Symbol`]，
//! 真正的画笔设置由宿主适配器实现。

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// 线端点样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapStyle {
    Flat,
    Square,
    Round,
}

/// 线连接样式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinStyle {
    Miter,
    Bevel,
    Round,
}

/// 宿主渲染接口
#[cfg_attr(test, mockall::automock)]
pub trait Renderer {
    fn set_fill_color(&mut self, color: Color);
    fn set_stroke_color(&mut self, color: Color);
    fn set_line_width(&mut self, width: f64);
    fn set_cap_join_style(&mut self, cap: CapStyle, join: JoinStyle);
}

/// 面符号：填充色 + 描边
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FillSymbol {
    pub fill_color: Color,
    pub stroke_color: Color,
    pub stroke_width: f64,
}

/// 线符号
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSymbol {
    pub color: Color,
    pub width: f64,
    pub cap_style: CapStyle,
    pub join_style: JoinStyle,
}

/// 规则携带的视觉样式
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Symbol {
    Fill(FillSymbol),
    Line(LineSymbol),
}

impl Symbol {
    pub fn fill(fill_color: Color, stroke_color: Color, stroke_width: f64) -> Self {
        Symbol::Fill(FillSymbol {
            fill_color,
            stroke_color,
            stroke_width,
        })
    }

    /// 圆头圆角的线符号
    pub fn round_line(color: Color, width: f64) -> Self {
        Symbol::Line(LineSymbol {
            color,
            width,
            cap_style: CapStyle::Round,
            join_style: JoinStyle::Round,
        })
    }

    /// 把符号应用到宿主渲染器
    pub fn apply(&self, renderer: &mut dyn Renderer) {
        match self {
            Symbol::Fill(s) => {
                renderer.set_fill_color(s.fill_color);
                renderer.set_stroke_color(s.stroke_color);
                renderer.set_line_width(s.stroke_width);
            }
            Symbol::Line(s) => {
                renderer.set_stroke_color(s.color);
                renderer.set_line_width(s.width);
                renderer.set_cap_join_style(s.cap_style, s.join_style);
            }
        }
    }
}

/// 记录最终画笔状态的渲染器，用于报告和测试
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaintState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<Color>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cap_style: Option<CapStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub join_style: Option<JoinStyle>,
}

impl PaintState {
    pub fn of(symbol: &Symbol) -> Self {
        let mut state = Self::default();
        symbol.apply(&mut state);
        state
    }
}

impl Renderer for PaintState {
    fn set_fill_color(&mut self, color: Color) {
        self.fill_color = Some(color);
    }

    fn set_stroke_color(&mut self, color: Color) {
        self.stroke_color = Some(color);
    }

    fn set_line_width(&mut self, width: f64) {
        self.line_width = Some(width);
    }

    fn set_cap_join_style(&mut self, cap: CapStyle, join: JoinStyle) {
        self.cap_style = Some(cap);
        self.join_style = Some(join);
    }
}
