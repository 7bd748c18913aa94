//! 规则渲染器

use crate::layer::Feature;
use crate::symbol::{Renderer, Symbol};
use rule_engine::{ClassificationResult, CompiledTable, RuleExecutor, RuleHitStats};
use tracing::trace;

/// 基于有序规则表的渲染器
///
/// 只做分类，实际绘制委托给宿主的 [`Renderer`]。
#[derive(Debug, Clone)]
pub struct RuleBasedRenderer {
    table: CompiledTable<Symbol>,
    executor: RuleExecutor,
}

impl RuleBasedRenderer {
    pub fn new(table: CompiledTable<Symbol>) -> Self {
        Self {
            table,
            executor: RuleExecutor::new(),
        }
    }

    pub fn with_executor(mut self, executor: RuleExecutor) -> Self {
        self.executor = executor;
        self
    }

    pub fn table(&self) -> &CompiledTable<Symbol> {
        &self.table
    }

    pub fn rule_count(&self) -> usize {
        self.table.len()
    }

    /// 对要素分类，返回完整的评估结果
    pub fn classify(&self, feature: &Feature) -> rule_engine::Result<ClassificationResult> {
        let result = self.executor.classify(&self.table, &feature.context())?;
        for line in &result.evaluation_trace {
            trace!(feature_id = feature.id, "{}", line);
        }
        Ok(result)
    }

    /// 要素命中的符号；未命中时为 None（使用宿主默认样式）
    pub fn symbol_for(&self, feature: &Feature) -> rule_engine::Result<Option<&Symbol>> {
        Ok(self
            .classify(feature)?
            .rule_index
            .map(|i| &self.table.rules()[i].symbol))
    }

    /// 把要素命中的符号应用到宿主渲染器，返回是否有符号生效
    pub fn render_feature(
        &self,
        feature: &Feature,
        renderer: &mut dyn Renderer,
    ) -> rule_engine::Result<bool> {
        match self.symbol_for(feature)? {
            Some(symbol) => {
                symbol.apply(renderer);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 统计一批要素在各规则上的命中次数
    pub fn hit_stats<'a, I>(&self, features: I) -> rule_engine::Result<RuleHitStats>
    where
        I: IntoIterator<Item = &'a Feature>,
    {
        self.executor
            .classify_all(&self.table, features.into_iter().map(Feature::context))
    }
}
