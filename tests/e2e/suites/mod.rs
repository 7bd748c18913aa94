//! 测试套件模块

pub mod cli_flow;
