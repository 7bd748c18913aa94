//! 宿主交互接口：进度反馈与地图画布

use crate::color::Color;
use tracing::info;

/// 进度反馈
#[cfg_attr(test, mockall::automock)]
pub trait Feedback {
    fn push_info(&mut self, message: &str);

    /// 宿主是否请求取消
    fn is_canceled(&self) -> bool {
        false
    }
}

/// 地图画布
#[cfg_attr(test, mockall::automock)]
pub trait MapCanvas {
    fn set_canvas_color(&mut self, color: Color);

    fn refresh(&mut self);
}

/// 处理上下文，画布在无界面运行时为 None
#[derive(Default)]
pub struct ProcessingContext<'a> {
    pub canvas: Option<&'a mut dyn MapCanvas>,
}

impl<'a> ProcessingContext<'a> {
    pub fn headless() -> Self {
        Self { canvas: None }
    }

    pub fn with_canvas(canvas: &'a mut dyn MapCanvas) -> Self {
        Self {
            canvas: Some(canvas),
        }
    }
}

/// 把进度消息写入 tracing 日志，并保留一份副本
#[derive(Debug, Default)]
pub struct TracingFeedback {
    messages: Vec<String>,
}

impl TracingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl Feedback for TracingFeedback {
    fn push_info(&mut self, message: &str) {
        info!("{}", message);
        self.messages.push(message.to_string());
    }
}
