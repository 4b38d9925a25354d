//! Valuation benchmarks.
//!
//! Benchmarks cover:
//! - Fitting on tables of increasing size
//! - Single-query latency
//! - Sequential vs parallel batch valuation
//!
//! # Running benchmarks
//!
//! ```bash
//! cargo bench --bench valuation
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use property_valuation::testing::synthetic_housing;
use property_valuation::{Confidence, PropertyQuery, ValuationConfig, Valuator};

// =============================================================================
// Fitting
// =============================================================================

fn bench_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("valuation/fit");

    for n_rows in [506, 5_000, 50_000] {
        let dataset = synthetic_housing(n_rows, 42);

        group.throughput(Throughput::Elements(n_rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n_rows), &dataset, |b, dataset| {
            b.iter(|| {
                let valuator = Valuator::fit(black_box(dataset), ValuationConfig::default());
                black_box(valuator)
            });
        });
    }

    group.finish();
}

// =============================================================================
// Queries
// =============================================================================

fn queries(n: usize) -> Vec<PropertyQuery> {
    (0..n)
        .map(|i| {
            PropertyQuery::builder()
                .rooms(3.0 + (i % 7) as f64)
                .pupil_teacher_ratio(12.0 + (i % 11) as f64)
                .next_to_river(i % 5 == 0)
                .confidence(Confidence::from_flag(i % 2 == 0))
                .build()
        })
        .collect()
}

fn bench_single_query(c: &mut Criterion) {
    let valuator = Valuator::fit(&synthetic_housing(506, 42), ValuationConfig::default())
        .expect("synthetic table fits");
    let query = PropertyQuery::new(6.0, 15.0);

    c.bench_function("valuation/dollar_estimate", |b| {
        b.iter(|| black_box(valuator.dollar_estimate(black_box(&query))))
    });
}

fn bench_batch(c: &mut Criterion) {
    let valuator = Valuator::fit(&synthetic_housing(506, 42), ValuationConfig::default())
        .expect("synthetic table fits");

    let mut group = c.benchmark_group("valuation/batch");

    for batch_size in [100, 10_000] {
        let batch = queries(batch_size);
        group.throughput(Throughput::Elements(batch_size as u64));

        group.bench_with_input(BenchmarkId::new("sequential", batch_size), &batch, |b, batch| {
            b.iter(|| {
                let out: Vec<_> = batch.iter().map(|q| valuator.dollar_estimate(q)).collect();
                black_box(out)
            });
        });

        group.bench_with_input(BenchmarkId::new("parallel", batch_size), &batch, |b, batch| {
            b.iter(|| black_box(valuator.dollar_estimates(black_box(batch))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit, bench_single_query, bench_batch);
criterion_main!(benches);
