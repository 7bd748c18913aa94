//! 规则表编译器
//!
//! 校验规则表结构，并预先提取规则引用的全部属性字段。

use crate::error::{Result, RuleError};
use crate::evaluator::ConditionEvaluator;
use crate::models::{Condition, Rule, RuleNode, RuleTable};
use crate::operators::Operator;
use serde::de::DeserializeOwned;
use std::collections::BTreeSet;

/// 编译后的规则表
#[derive(Debug, Clone)]
pub struct CompiledTable<S> {
    /// 原始规则表
    pub table: RuleTable<S>,
    /// 规则中使用的所有字段（有序，便于日志输出）
    pub required_fields: BTreeSet<String>,
}

impl<S> CompiledTable<S> {
    pub fn name(&self) -> &str {
        &self.table.name
    }

    pub fn rules(&self) -> &[Rule<S>] {
        &self.table.rules
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// 返回规则引用了、但 `fields` 中不存在的字段
    ///
    /// `$id` 等保留字段不参与检查。
    pub fn missing_fields<'a>(&'a self, fields: &[String]) -> Vec<&'a str> {
        self.required_fields
            .iter()
            .filter(|f| !f.starts_with('$'))
            .filter(|f| !fields.iter().any(|have| have == *f))
            .map(String::as_str)
            .collect()
    }
}

/// 规则表编译器
pub struct RuleCompiler;

impl RuleCompiler {
    /// 从 JSON 字符串编译规则表
    pub fn compile_from_json<S: DeserializeOwned>(json: &str) -> Result<CompiledTable<S>> {
        let table: RuleTable<S> = serde_json::from_str(json)?;
        Self::compile(table)
    }

    /// 编译规则表
    pub fn compile<S>(table: RuleTable<S>) -> Result<CompiledTable<S>> {
        if table.name.is_empty() {
            return Err(RuleError::CompileError("规则表名称不能为空".to_string()));
        }

        let mut required_fields = BTreeSet::new();
        for (i, rule) in table.rules.iter().enumerate() {
            let path = format!("{}.rules[{}]", table.name, i);
            Self::validate_rule(rule, &path)?;
            Self::collect_fields(&rule.filter, &mut required_fields);
        }

        Ok(CompiledTable {
            table,
            required_fields,
        })
    }

    fn validate_rule<S>(rule: &Rule<S>, path: &str) -> Result<()> {
        if rule.label.is_empty() {
            return Err(RuleError::CompileError(format!(
                "规则 '{}' 的标签不能为空",
                path
            )));
        }

        Self::validate_node(&rule.filter, &format!("{}.filter", path))
    }

    /// 验证规则节点
    fn validate_node(node: &RuleNode, path: &str) -> Result<()> {
        match node {
            RuleNode::Condition(cond) => Self::validate_condition(cond, path)?,
            RuleNode::Group(group) => {
                if group.children.is_empty() {
                    return Err(RuleError::ParseError(format!(
                        "逻辑组 '{}' 不能为空",
                        path
                    )));
                }

                for (i, child) in group.children.iter().enumerate() {
                    let child_path = format!("{}.children[{}]", path, i);
                    Self::validate_node(child, &child_path)?;
                }
            }
        }

        Ok(())
    }

    /// 验证条件
    fn validate_condition(cond: &Condition, path: &str) -> Result<()> {
        if cond.field.is_empty() {
            return Err(RuleError::ParseError(format!(
                "条件 '{}' 的字段不能为空",
                path
            )));
        }

        match cond.operator {
            Operator::In | Operator::NotIn => {
                if !cond.value.is_array() {
                    return Err(RuleError::ParseError(format!(
                        "条件 '{}' 的 {} 操作符需要数组值",
                        path, cond.operator
                    )));
                }
            }
            Operator::ModEq => {
                ConditionEvaluator::mod_operands(&cond.value).map_err(|e| {
                    RuleError::ParseError(format!("条件 '{}' 的 mod_eq 取值无效: {}", path, e))
                })?;
            }
            // 空值检查不需要值，其余操作符不做特殊验证
            _ => {}
        }

        Ok(())
    }

    /// 递归收集字段
    fn collect_fields(node: &RuleNode, fields: &mut BTreeSet<String>) {
        match node {
            RuleNode::Condition(cond) => {
                fields.insert(cond.field.clone());
            }
            RuleNode::Group(group) => {
                for child in &group.children {
                    Self::collect_fields(child, fields);
                }
            }
        }
    }
}
