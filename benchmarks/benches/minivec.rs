// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};

use minivec::MiniVec;

// Fast mode: FAST_BENCH=1 cargo bench -p benchmarks --bench minivec
fn is_fast_mode() -> bool {
    std::env::var("FAST_BENCH")
        .map(|v| v == "1")
        .unwrap_or(false)
}

fn configure_group(group: &mut criterion::BenchmarkGroup<criterion::measurement::WallTime>) {
    if is_fast_mode() {
        group.measurement_time(std::time::Duration::from_millis(500));
        group.sample_size(10);
    } else {
        group.measurement_time(std::time::Duration::from_secs(3));
        group.sample_size(50);
    }
}

fn filled(size: usize) -> MiniVec<u64> {
    MiniVec::from_range((0..size).map(|i| i as u64)).expect("Failed to from_range(..)")
}

// =============================================================================
// Growth
// =============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::new();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("MiniVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = MiniVec::new();
                for i in 0..s {
                    vec.push_back(i as u64).expect("Failed to push_back(..)");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_push_back_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back_reserved");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            let mut vec = Vec::with_capacity(s);
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push(i as u64);
                }
                black_box(&vec);
            });
        });

        group.bench_with_input(BenchmarkId::new("MiniVec", size), &size, |b, &s| {
            let mut vec = MiniVec::with_capacity(s).expect("Failed to with_capacity(..)");
            b.iter(|| {
                vec.clear();
                for i in 0..s {
                    vec.push_back(i as u64).expect("Failed to push_back(..)");
                }
                black_box(&vec);
            });
        });
    }

    group.finish();
}

// =============================================================================
// Insert / erase
// =============================================================================

fn bench_insert_front(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_front");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(1));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.insert(0, 42);
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("MiniVec", size), &size, |b, &s| {
            b.iter_batched(
                || filled(s),
                |mut vec| {
                    vec.insert(0, 42).expect("Failed to insert(..)");
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn bench_erase_range_middle(c: &mut Criterion) {
    let mut group = c.benchmark_group("erase_range_middle");
    configure_group(&mut group);

    for size in [100, 1_000, 10_000] {
        let first = size / 4;
        let last = size / 2;
        group.throughput(Throughput::Elements((last - first) as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u64).collect::<Vec<_>>(),
                |mut vec| {
                    vec.drain(first..last);
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("MiniVec", size), &size, |b, &s| {
            b.iter_batched(
                || filled(s),
                |mut vec| {
                    vec.erase_range(first..last);
                    black_box(vec)
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

// =============================================================================
// Traversal
// =============================================================================

fn bench_cursor_sum(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_sum");
    configure_group(&mut group);

    for size in [1_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));
        let vec = filled(size);

        group.bench_with_input(BenchmarkId::new("slice_iter", size), &vec, |b, vec| {
            b.iter(|| black_box(vec.iter().sum::<u64>()));
        });

        group.bench_with_input(BenchmarkId::new("cursor", size), &vec, |b, vec| {
            b.iter(|| black_box(vec.begin().sum::<u64>()));
        });

        group.bench_with_input(BenchmarkId::new("rev_cursor", size), &vec, |b, vec| {
            b.iter(|| black_box(vec.rbegin().sum::<u64>()));
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    configure_group(&mut group);

    for size in [1_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("MiniVec", size), &size, |b, &s| {
            b.iter_batched(
                || MiniVec::from_range((0..s).rev().map(|i| i as u64)).expect("Failed to from_range(..)"),
                |mut vec| {
                    vec.sort_unstable();
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_back_reserved,
    bench_insert_front,
    bench_erase_range_middle,
    bench_cursor_sum,
    bench_sort,
);
criterion_main!(benches);
