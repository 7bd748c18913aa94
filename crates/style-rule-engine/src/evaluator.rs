//! 条件评估器
//!
//! 实现各操作符的评估逻辑。空值语义与渲染器的过滤表达式一致：
//! 字段缺失或为 null 时，除空值检查外的所有比较都返回 false。

use crate::error::{Result, RuleError};
use crate::operators::Operator;
use serde_json::Value;

/// 条件评估器
pub struct ConditionEvaluator;

impl ConditionEvaluator {
    /// 评估条件
    ///
    /// # Arguments
    /// * `field_value` - 从上下文中获取的字段值
    /// * `operator` - 操作符
    /// * `expected_value` - 规则中定义的期望值
    pub fn evaluate(
        field_value: Option<&Value>,
        operator: Operator,
        expected_value: &Value,
    ) -> Result<bool> {
        match operator {
            Operator::IsNull => return Ok(Self::is_null(field_value)),
            Operator::IsNotNull => return Ok(!Self::is_null(field_value)),
            Operator::IsEmpty => return Ok(Self::is_empty(field_value)),
            Operator::IsNotEmpty => return Ok(!Self::is_empty(field_value)),
            _ => {}
        }

        // null 参与比较的结果为 null，过滤表达式把它当作 false
        let field_value = match field_value {
            None | Some(Value::Null) => return Ok(false),
            Some(v) => v,
        };

        match operator {
            Operator::Eq => Ok(Self::eq(field_value, expected_value)),
            Operator::Neq => Ok(!Self::eq(field_value, expected_value)),
            Operator::In => Self::in_list(field_value, expected_value),
            Operator::NotIn => Self::in_list(field_value, expected_value).map(|r| !r),
            Operator::ModEq => Self::mod_eq(field_value, expected_value),
            Operator::IsNull | Operator::IsNotNull | Operator::IsEmpty | Operator::IsNotEmpty => {
                unreachable!()
            }
        }
    }

    fn is_null(value: Option<&Value>) -> bool {
        matches!(value, None | Some(Value::Null))
    }

    /// 判断值是否为空
    fn is_empty(value: Option<&Value>) -> bool {
        match value {
            None => true,
            Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(Value::Array(arr)) => arr.is_empty(),
            Some(Value::Object(obj)) => obj.is_empty(),
            _ => false,
        }
    }

    /// 相等比较
    fn eq(field: &Value, expected: &Value) -> bool {
        // 数值统一转为浮点数比较，避免 100 与 100.0 不相等
        if let (Value::Number(a), Value::Number(b)) = (field, expected) {
            if let (Some(f1), Some(f2)) = (a.as_f64(), b.as_f64()) {
                return (f1 - f2).abs() < f64::EPSILON;
            }
        }

        field == expected
    }

    /// 列表包含检查 (in)
    fn in_list(field: &Value, expected: &Value) -> Result<bool> {
        let arr = expected
            .as_array()
            .ok_or_else(|| RuleError::TypeMismatch {
                expected: "array".to_string(),
                actual: Self::type_name(expected).to_string(),
            })?;

        Ok(arr.iter().any(|item| Self::eq(field, item)))
    }

    /// 整数取模 (mod_eq)
    ///
    /// expected 为 `[divisor, remainder]`。字段值可以是整数或整数字符串
    /// （部分 OSM 导出把 osm_id 存成文本）；无法转为整数时视为不匹配。
    /// 余数按截断除法计算，负数的余数为负，不会命中任何非负余数。
    fn mod_eq(field: &Value, expected: &Value) -> Result<bool> {
        let (divisor, remainder) = Self::mod_operands(expected)?;

        Ok(match Self::as_i128(field) {
            Some(n) => n % divisor as i128 == remainder as i128,
            None => false,
        })
    }

    /// 解析 mod_eq 的期望值
    pub(crate) fn mod_operands(expected: &Value) -> Result<(u64, u64)> {
        let arr = expected.as_array().ok_or_else(|| RuleError::TypeMismatch {
            expected: "array [divisor, remainder]".to_string(),
            actual: Self::type_name(expected).to_string(),
        })?;

        if arr.len() != 2 {
            return Err(RuleError::ParseError(
                "mod_eq 操作符需要 [divisor, remainder] 数组".to_string(),
            ));
        }

        let divisor = arr[0].as_u64().ok_or_else(|| RuleError::TypeMismatch {
            expected: "unsigned integer".to_string(),
            actual: Self::type_name(&arr[0]).to_string(),
        })?;

        let remainder = arr[1].as_u64().ok_or_else(|| RuleError::TypeMismatch {
            expected: "unsigned integer".to_string(),
            actual: Self::type_name(&arr[1]).to_string(),
        })?;

        if divisor == 0 {
            return Err(RuleError::ParseError("mod_eq 的除数不能为 0".to_string()));
        }

        if remainder >= divisor {
            return Err(RuleError::ParseError(format!(
                "mod_eq 的余数 {} 必须小于除数 {}",
                remainder, divisor
            )));
        }

        Ok((divisor, remainder))
    }

    /// 尝试将 Value 转换为整数
    fn as_i128(value: &Value) -> Option<i128> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(i128::from)
                .or_else(|| n.as_u64().map(i128::from))
                .or_else(|| {
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.is_finite())
                        .map(|f| f as i128)
                }),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// 获取值的类型名称
    fn type_name(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
