//! Benchmarks for the root-finding solvers.
//!
//! Run with: cargo bench -p rootlab-core

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use rootlab_core::prelude::*;

// =============================================================================
// SOLVER BENCHMARKS
// =============================================================================

fn bench_polynomial(c: &mut Criterion) {
    let mut group = c.benchmark_group("polynomial");
    let config = SolverConfig::new(1e-12, 200);
    let f = |x: f64| x * x * x - 2.0 * x - 5.0;
    let df = |x: f64| 3.0 * x * x - 2.0;

    group.bench_function("bisection", |b| {
        b.iter(|| bisection(&f, black_box(2.0), black_box(3.0), &config))
    });
    group.bench_function("newton", |b| {
        b.iter(|| newton_raphson(&f, &df, black_box(2.5), &config))
    });
    group.bench_function("newton_numerical", |b| {
        b.iter(|| newton_raphson_numerical(&f, black_box(2.5), &config))
    });
    group.bench_function("secant", |b| {
        b.iter(|| secant(&f, black_box(2.0), black_box(3.0), &config))
    });

    group.finish();
}

fn bench_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");

    for tolerance in [1e-6, 1e-10, 1e-14] {
        let config = SolverConfig::new(tolerance, 500);
        group.bench_with_input(
            BenchmarkId::new("plain", tolerance),
            &config,
            |b, config| b.iter(|| fixed_point(&f64::cos, black_box(0.5), config)),
        );
        group.bench_with_input(
            BenchmarkId::new("aitken", tolerance),
            &config,
            |b, config| b.iter(|| aitken_fixed_point(&f64::cos, black_box(0.5), config)),
        );
    }

    group.finish();
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("aitken_transform");

    for len in [16_usize, 256, 4096] {
        let sequence: Vec<f64> = (0..len)
            .map(|n| 1.0 + 0.9_f64.powi(n as i32))
            .collect();
        group.bench_with_input(BenchmarkId::from_parameter(len), &sequence, |b, seq| {
            b.iter(|| AitkenTransform::accelerate(black_box(seq)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_polynomial, bench_fixed_point, bench_transform);
criterion_main!(benches);
