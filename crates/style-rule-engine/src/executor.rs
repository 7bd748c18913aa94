//! 规则执行器
//!
//! 按表内顺序线性扫描规则，返回第一条过滤条件成立的规则（first-match-wins）。
//! 逻辑组采用短路求值。

use crate::compiler::CompiledTable;
use crate::error::Result;
use crate::evaluator::ConditionEvaluator;
use crate::models::{
    ClassificationResult, Condition, EvaluationContext, LogicalGroup, Rule, RuleHit,
    RuleHitStats, RuleNode,
};
use crate::operators::LogicalOperator;
use tracing::debug;

/// 规则执行器
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleExecutor {
    /// 是否记录详细评估追踪
    trace_enabled: bool,
}

impl RuleExecutor {
    pub fn new() -> Self {
        Self {
            trace_enabled: false,
        }
    }

    /// 启用评估追踪
    pub fn with_trace(mut self) -> Self {
        self.trace_enabled = true;
        self
    }

    /// 查找第一条匹配的规则
    pub fn find_match<'t, S>(
        &self,
        table: &'t CompiledTable<S>,
        context: &EvaluationContext<'_>,
    ) -> Result<Option<&'t Rule<S>>> {
        let result = self.classify(table, context)?;
        Ok(result.rule_index.map(|i| &table.rules()[i]))
    }

    /// 对单个要素执行分类
    pub fn classify<S>(
        &self,
        table: &CompiledTable<S>,
        context: &EvaluationContext<'_>,
    ) -> Result<ClassificationResult> {
        let mut result = ClassificationResult::default();

        for (i, rule) in table.rules().iter().enumerate() {
            let path = self.trace_path(|| format!("{}[{}]", table.name(), i));
            let matched = self.evaluate_node(&rule.filter, context, &mut result, &path)?;

            if self.trace_enabled {
                result.evaluation_trace.push(format!(
                    "{}: 规则 '{}' => {}",
                    path,
                    rule.label,
                    if matched { "MATCHED" } else { "NOT_MATCHED" }
                ));
            }

            if matched {
                result.matched = true;
                result.rule_index = Some(i);
                result.rule_label = Some(rule.label.clone());
                return Ok(result);
            }

            // 未命中规则的条件不计入结果
            result.matched_conditions.clear();
        }

        Ok(result)
    }

    /// 对一批要素分类并统计各规则命中次数
    pub fn classify_all<'a, S, I>(&self, table: &CompiledTable<S>, contexts: I) -> Result<RuleHitStats>
    where
        I: IntoIterator<Item = EvaluationContext<'a>>,
    {
        let mut counts = vec![0usize; table.len()];
        let mut total = 0;
        let mut unmatched = 0;

        for context in contexts {
            total += 1;
            match self.classify(table, &context)?.rule_index {
                Some(i) => counts[i] += 1,
                None => unmatched += 1,
            }
        }

        debug!(
            table = %table.name(),
            total,
            unmatched,
            "Classified features"
        );

        Ok(RuleHitStats {
            table: table.name().to_string(),
            total,
            unmatched,
            hits: table
                .rules()
                .iter()
                .zip(counts)
                .map(|(rule, count)| RuleHit {
                    label: rule.label.clone(),
                    count,
                })
                .collect(),
        })
    }

    /// 追踪用的节点路径，未启用追踪时为空串（不分配）
    fn trace_path(&self, build: impl FnOnce() -> String) -> String {
        if self.trace_enabled {
            build()
        } else {
            String::new()
        }
    }

    /// 递归评估规则节点
    fn evaluate_node(
        &self,
        node: &RuleNode,
        context: &EvaluationContext<'_>,
        result: &mut ClassificationResult,
        path: &str,
    ) -> Result<bool> {
        match node {
            RuleNode::Condition(cond) => self.evaluate_condition(cond, context, result, path),
            RuleNode::Group(group) => self.evaluate_group(group, context, result, path),
        }
    }

    /// 评估条件节点
    fn evaluate_condition(
        &self,
        cond: &Condition,
        context: &EvaluationContext<'_>,
        result: &mut ClassificationResult,
        path: &str,
    ) -> Result<bool> {
        let field_value = context.get_field(&cond.field);

        let matched = ConditionEvaluator::evaluate(field_value, cond.operator, &cond.value)?;

        if self.trace_enabled {
            result.evaluation_trace.push(format!(
                "{}: {} {} {} => {}",
                path,
                cond.field,
                cond.operator,
                cond.value,
                if matched { "MATCHED" } else { "NOT_MATCHED" }
            ));
        }

        if matched {
            result
                .matched_conditions
                .push(format!("{} {} {}", cond.field, cond.operator, cond.value));
        }

        Ok(matched)
    }

    /// 评估逻辑组节点（短路求值）
    fn evaluate_group(
        &self,
        group: &LogicalGroup,
        context: &EvaluationContext<'_>,
        result: &mut ClassificationResult,
        path: &str,
    ) -> Result<bool> {
        match group.operator {
            LogicalOperator::And => {
                for (i, child) in group.children.iter().enumerate() {
                    let child_path = self.trace_path(|| format!("{}.children[{}]", path, i));
                    if !self.evaluate_node(child, context, result, &child_path)? {
                        if self.trace_enabled {
                            result
                                .evaluation_trace
                                .push(format!("{}: AND 短路 - 子节点 {} 不匹配", path, i));
                        }
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            LogicalOperator::Or => {
                for (i, child) in group.children.iter().enumerate() {
                    let child_path = self.trace_path(|| format!("{}.children[{}]", path, i));
                    if self.evaluate_node(child, context, result, &child_path)? {
                        if self.trace_enabled {
                            result
                                .evaluation_trace
                                .push(format!("{}: OR 短路 - 子节点 {} 匹配", path, i));
                        }
                        return Ok(true);
                    }
                }
                Ok(false)
            }
        }
    }
}
