//! Queue metric benchmarks.
//!
//! Erlang-C cost grows linearly with the server count; cached reads should be
//! flat regardless of c.
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use queue_metrics::prelude::*;

/// Full recompute: mutate μ, then read Lq.
fn bench_erlang_c_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("ErlangC_recompute");
    group.sample_size(100);
    group.confidence_level(0.95);

    for servers in [1u32, 10, 100, 1000] {
        group.bench_with_input(
            BenchmarkId::new("mmc_lq", servers),
            &servers,
            |b, &servers| {
                let lambda = 0.9 * f64::from(servers);
                let mut q = MMcQueue::new(lambda, 1.0, servers);
                let mut toggle = false;
                b.iter(|| {
                    toggle = !toggle;
                    q.set_mu(if toggle { 1.0 } else { 1.01 });
                    black_box(q.lq())
                });
            },
        );
    }

    group.finish();
}

/// Cached reads after the first evaluation.
fn bench_cached_reads(c: &mut Criterion) {
    let mut group = c.benchmark_group("cached_reads");
    group.sample_size(100);

    for servers in [1u32, 1000] {
        group.bench_with_input(
            BenchmarkId::new("mmc_all_metrics", servers),
            &servers,
            |b, &servers| {
                let q = MMcQueue::new(0.9 * f64::from(servers), 1.0, servers);
                let _ = q.lq();
                b.iter(|| black_box((q.p0(), q.lq(), q.l(), q.wq(), q.w())));
            },
        );
    }

    group.finish();
}

/// Per-class metrics for a many-class priority queue.
fn bench_priority_classes(c: &mut Criterion) {
    let mut group = c.benchmark_group("priority_classes");
    group.sample_size(100);

    for classes in [3usize, 30] {
        group.bench_with_input(
            BenchmarkId::new("wq_k_all", classes),
            &classes,
            |b, &classes| {
                let rates = vec![1.0; classes];
                let q = MMcPriorityQueue::new(rates, 1.0, classes as u32 + 2);
                b.iter(|| {
                    let total: f64 = (1..=classes).map(|k| q.lq_k(k)).sum();
                    black_box(total)
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_erlang_c_recompute,
    bench_cached_reads,
    bench_priority_classes
);
criterion_main!(benches);
