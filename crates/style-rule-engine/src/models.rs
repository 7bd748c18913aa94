//! 规则引擎领域模型

use crate::operators::{LogicalOperator, Operator};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 要素内部序号的保留字段名
///
/// 不对应任何真实属性，由 [`EvaluationContext`] 根据要素的内部序号提供。
pub const FEATURE_ID_FIELD: &str = "$id";

/// 单条样式规则：过滤条件 + 符号
///
/// 规则在 [`RuleTable`] 中的位置即优先级，越靠前越先评估。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rule<S> {
    pub label: String,
    pub filter: RuleNode,
    pub symbol: S,
}

impl<S> Rule<S> {
    pub fn new(label: impl Into<String>, filter: impl Into<RuleNode>, symbol: S) -> Self {
        Self {
            label: label.into(),
            filter: filter.into(),
            symbol,
        }
    }
}

/// 有序规则表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleTable<S> {
    pub name: String,
    pub rules: Vec<Rule<S>>,
}

impl<S> RuleTable<S> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    /// 追加一条规则（排在已有规则之后）
    pub fn push(&mut self, rule: Rule<S>) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: Rule<S>) -> Self {
        self.push(rule);
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }
}

/// 规则节点（条件或逻辑组）
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleNode {
    Condition(Condition),
    Group(LogicalGroup),
}

impl From<Condition> for RuleNode {
    fn from(cond: Condition) -> Self {
        RuleNode::Condition(cond)
    }
}

impl From<LogicalGroup> for RuleNode {
    fn from(group: LogicalGroup) -> Self {
        RuleNode::Group(group)
    }
}

/// 条件节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub operator: Operator,
    #[serde(default)]
    pub value: Value,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    pub fn eq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Eq, value)
    }

    pub fn neq(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(field, Operator::Neq, value)
    }

    pub fn is_not_null(field: impl Into<String>) -> Self {
        Self::new(field, Operator::IsNotNull, Value::Null)
    }

    /// `field % divisor = remainder`
    pub fn mod_eq(field: impl Into<String>, divisor: u64, remainder: u64) -> Self {
        Self::new(
            field,
            Operator::ModEq,
            Value::Array(vec![divisor.into(), remainder.into()]),
        )
    }
}

/// 逻辑组节点
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogicalGroup {
    pub operator: LogicalOperator,
    pub children: Vec<RuleNode>,
}

impl LogicalGroup {
    pub fn new(operator: LogicalOperator, children: Vec<RuleNode>) -> Self {
        Self { operator, children }
    }

    pub fn and(children: Vec<RuleNode>) -> Self {
        Self::new(LogicalOperator::And, children)
    }

    pub fn or(children: Vec<RuleNode>) -> Self {
        Self::new(LogicalOperator::Or, children)
    }

    /// 由 `(字段, 取值)` 列表构造等值条件的 OR 组
    pub fn any_eq<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        Self::or(
            pairs
                .into_iter()
                .map(|(field, value)| Condition::eq(field, value).into())
                .collect(),
        )
    }
}

/// 评估上下文 - 单个要素的属性视图
#[derive(Debug, Clone)]
pub struct EvaluationContext<'a> {
    attributes: &'a Map<String, Value>,
    feature_id: Value,
}

impl<'a> EvaluationContext<'a> {
    pub fn new(attributes: &'a Map<String, Value>) -> Self {
        Self {
            attributes,
            feature_id: Value::Null,
        }
    }

    /// 绑定要素内部序号，供 `$id` 字段读取
    pub fn with_feature_id(mut self, id: u64) -> Self {
        self.feature_id = Value::from(id);
        self
    }

    /// 获取字段值
    ///
    /// `$id` 返回要素内部序号；其余字段直接查属性表，缺失时返回 None。
    pub fn get_field(&self, name: &str) -> Option<&Value> {
        if name == FEATURE_ID_FIELD {
            return match &self.feature_id {
                Value::Null => None,
                id => Some(id),
            };
        }
        self.attributes.get(name)
    }

    /// 获取底层属性
    pub fn attributes(&self) -> &Map<String, Value> {
        self.attributes
    }
}

/// 单个要素的分类结果
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClassificationResult {
    pub matched: bool,
    /// 命中规则在表中的下标
    pub rule_index: Option<usize>,
    pub rule_label: Option<String>,
    pub matched_conditions: Vec<String>,
    pub evaluation_trace: Vec<String>,
}

/// 规则表在一批要素上的命中统计
#[derive(Debug, Clone, Serialize)]
pub struct RuleHitStats {
    pub table: String,
    pub total: usize,
    pub unmatched: usize,
    pub hits: Vec<RuleHit>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RuleHit {
    pub label: String,
    pub count: usize,
}
