//! Criterion benchmarks for vaxpolicy_core evaluation and sweeps
//!
//! Run with: cargo bench -p vaxpolicy_core

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use vaxpolicy_core::analysis::{BreakEvenConfig, find_break_even, grid_sweep, linspace, sweep};
use vaxpolicy_core::{ModelParameters, ParameterField, evaluate};

fn bench_evaluate(c: &mut Criterion) {
    let params = ModelParameters::default();
    c.bench_function("evaluate_baseline", |b| {
        b.iter(|| evaluate(black_box(&params)))
    });
}

fn bench_sweep(c: &mut Criterion) {
    let params = ModelParameters::default();
    let mut group = c.benchmark_group("sweep_mandate_adoption");
    for points in [10, 100, 1_000, 10_000] {
        let values = linspace(0.0, 1.0, points);
        group.bench_with_input(BenchmarkId::from_parameter(points), &values, |b, values| {
            b.iter(|| sweep(&params, ParameterField::MandateAdoptionRate, black_box(values)))
        });
    }
    group.finish();
}

fn bench_grid_sweep(c: &mut Criterion) {
    let params = ModelParameters::default();
    let mut group = c.benchmark_group("grid_sweep_enforcement_adoption");
    for side in [10, 50, 100] {
        let costs = linspace(10e6, 500e6, side);
        let rates = linspace(0.6, 1.0, side);
        group.bench_with_input(BenchmarkId::from_parameter(side), &side, |b, _| {
            b.iter(|| {
                grid_sweep(
                    &params,
                    ParameterField::EnforcementCost,
                    black_box(&costs),
                    ParameterField::MandateAdoptionRate,
                    black_box(&rates),
                )
            })
        });
    }
    group.finish();
}

fn bench_break_even(c: &mut Criterion) {
    let params = ModelParameters::default();
    let config = BreakEvenConfig::default();
    c.bench_function("break_even_mandate_adoption", |b| {
        b.iter(|| {
            find_break_even(
                black_box(&params),
                ParameterField::MandateAdoptionRate,
                0.6,
                1.0,
                &config,
            )
        })
    });
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_sweep,
    bench_grid_sweep,
    bench_break_even
);
criterion_main!(benches);
