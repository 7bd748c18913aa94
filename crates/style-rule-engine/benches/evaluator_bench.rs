//! 条件评估器性能基准测试
//!
//! 针对 ConditionEvaluator 的各种操作进行细粒度的性能测试。

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rule_engine::{ConditionEvaluator, Operator};
use serde_json::{json, Value};
use std::hint::black_box;

/// 等值比较基准
fn bench_equality_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("equality_operations");

    let field = json!("residential");
    let same = json!("residential");
    let other = json!("motorway");

    group.bench_function("eq_hit", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&field)),
                black_box(Operator::Eq),
                black_box(&same),
            )
        })
    });

    group.bench_function("eq_miss", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&field)),
                black_box(Operator::Eq),
                black_box(&other),
            )
        })
    });

    group.bench_function("neq", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&field)),
                black_box(Operator::Neq),
                black_box(&other),
            )
        })
    });

    group.finish();
}

/// IN 操作符在不同列表长度下的性能
fn bench_in_operator_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("in_operator_scaling");

    for size in [4, 16, 64] {
        let list: Value = (0..size).map(|i| json!(format!("value_{}", i))).collect();
        // 命中列表最后一个元素，覆盖最坏情况
        let field = json!(format!("value_{}", size - 1));

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                ConditionEvaluator::evaluate(
                    black_box(Some(&field)),
                    black_box(Operator::In),
                    black_box(&list),
                )
            })
        });
    }

    group.finish();
}

/// 取模操作基准
fn bench_mod_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("mod_operations");

    let numeric_id = json!(240109189u64);
    let text_id = json!("240109189");
    let operands = json!([3, 1]);

    group.bench_function("mod_eq_number", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&numeric_id)),
                black_box(Operator::ModEq),
                black_box(&operands),
            )
        })
    });

    group.bench_function("mod_eq_string", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&text_id)),
                black_box(Operator::ModEq),
                black_box(&operands),
            )
        })
    });

    group.finish();
}

/// 空值检查操作基准
fn bench_null_checks(c: &mut Criterion) {
    let mut group = c.benchmark_group("null_checks");

    let null_value = json!(null);
    let empty_string = json!("");
    let non_empty = json!("yes");

    group.bench_function("is_not_null_present", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&non_empty)),
                black_box(Operator::IsNotNull),
                black_box(&null_value),
            )
        })
    });

    group.bench_function("is_not_null_none", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(None),
                black_box(Operator::IsNotNull),
                black_box(&null_value),
            )
        })
    });

    group.bench_function("is_empty_string", |b| {
        b.iter(|| {
            ConditionEvaluator::evaluate(
                black_box(Some(&empty_string)),
                black_box(Operator::IsEmpty),
                black_box(&null_value),
            )
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_equality_operations,
    bench_in_operator_scaling,
    bench_mod_operations,
    bench_null_checks,
);

criterion_main!(benches);
