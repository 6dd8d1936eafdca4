//! Trend-filter benchmarks using Criterion.
//!
//! Benchmarks cover:
//! - Scalability over signal length (the per-solve system inverse
//!   dominates, so cost grows quickly with n)
//! - Regularization weights (lambda changes the iteration count)
//! - Warm operator cache vs. overall solve cost
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use l1tf_rs::prelude::*;
use rand::prelude::*;
use rand_distr::Normal;
use std::hint::black_box;

// ============================================================================
// Data Generation with Reproducible RNG
// ============================================================================

/// Generate a random walk (cumulative sum of standard normal steps).
fn generate_random_walk(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let step = Normal::new(0.0, 1.0).unwrap();

    let mut level = 0.0;
    (0..size)
        .map(|_| {
            level += step.sample(&mut rng);
            level
        })
        .collect()
}

/// Generate a noisy piecewise-linear signal.
fn generate_piecewise_linear(size: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.3).unwrap();

    (0..size)
        .map(|i| {
            let x = i as f64;
            let slope = if i < size / 2 { 0.5 } else { -0.3 };
            let base = if i < size / 2 {
                slope * x
            } else {
                0.5 * (size / 2) as f64 + slope * (x - (size / 2) as f64)
            };
            base + noise.sample(&mut rng)
        })
        .collect()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_scalability(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalability");

    for size in [50, 100, 250, 500] {
        let y = generate_random_walk(size, 42);
        let model = L1tf::new().iter_max(200).build().unwrap();

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &y, |b, y| {
            b.iter(|| black_box(model.fit(black_box(y)).unwrap()));
        });
    }

    group.finish();
}

fn bench_lambda(c: &mut Criterion) {
    let mut group = c.benchmark_group("lambda");
    let y = generate_piecewise_linear(200, 7);

    for lambda in [0.1, 1.0, 10.0] {
        let model = L1tf::new()
            .lambda(lambda)
            .iter_max(500)
            .build()
            .unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(lambda), &y, |b, y| {
            b.iter(|| black_box(model.fit(black_box(y)).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scalability, bench_lambda);
criterion_main!(benches);
