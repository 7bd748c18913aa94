//! 样式规则引擎
//!
//! 为地图要素提供有序规则分类能力，支持：
//! - 条件 / 逻辑组组成的过滤表达式（可从 JSON 定义）
//! - 规则表校验与字段提取
//! - first-match-wins 的线性扫描执行与短路求值

pub mod compiler;
pub mod error;
pub mod evaluator;
pub mod executor;
pub mod models;
pub mod operators;

pub use compiler::{CompiledTable, RuleCompiler};
pub use error::{Result, RuleError};
pub use evaluator::ConditionEvaluator;
pub use executor::RuleExecutor;
pub use models::{
    ClassificationResult, Condition, EvaluationContext, FEATURE_ID_FIELD, LogicalGroup, Rule,
    RuleHit, RuleHitStats, RuleNode, RuleTable,
};
pub use operators::{LogicalOperator, Operator};
