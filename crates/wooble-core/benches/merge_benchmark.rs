//! Parameter merge benchmarks.

use criterion::{criterion_group, criterion_main, Criterion, black_box};
use serde_json::json;
use wooble_core::Params;

fn wide_defaults() -> Params {
    (0..64).map(|i| (format!("param{}", i), json!(i))).collect()
}

fn merge_small(c: &mut Criterion) {
    let defaults = Params::new().with("a", 1).with("b", "two").with("c", json!([3]));
    let overrides = Params::new().with("a", 9).with("z", 5);

    c.bench_function("merge_small", |b| {
        b.iter(|| black_box(&defaults).merged_with(black_box(&overrides)))
    });
}

fn merge_wide(c: &mut Criterion) {
    let defaults = wide_defaults();
    let overrides: Params = (0..64)
        .step_by(2)
        .map(|i| (format!("param{}", i), json!({ "override": i })))
        .collect();

    c.bench_function("merge_wide", |b| {
        b.iter(|| black_box(&defaults).merged_with(black_box(&overrides)))
    });
}

criterion_group!(benches, merge_small, merge_wide);
criterion_main!(benches);
