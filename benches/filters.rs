//! Prototype and filter benchmarks.
//!
//! Measures materialization cost across shape sizes, the matching and
//! distance primitives, and counting filter merge/remove round trips.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use protobloom::prelude::*;

mod common;
use common::*;

fn bench_materialize_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("materialize");

    for &size in SIZES {
        let shape = Shape::new(size, 100).unwrap();
        let prototype = random_prototype(size as usize);

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &prototype, |b, prototype| {
            b.iter(|| prototype.materialize(black_box(&shape)));
        });
    }

    group.finish();
}

fn bench_build_prototype(c: &mut Criterion) {
    let items = generate_strings(1_000, 32);
    let mut group = c.benchmark_group("prototype_builder");
    group.throughput(Throughput::Elements(items.len() as u64));

    group.bench_function("update_1000", |b| {
        b.iter(|| {
            let mut builder = PrototypeBuilder::new();
            for item in &items {
                builder.update(black_box(item));
            }
            builder.build()
        });
    });

    group.finish();
}

fn bench_match_and_distance(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_distance");

    for &size in SIZES {
        let shape = Shape::new(size, 100).unwrap();
        let full = random_prototype(size as usize).materialize(&shape);
        let query = random_prototype(1).materialize(&shape);

        group.bench_with_input(BenchmarkId::new("matches", size), &size, |b, _| {
            b.iter(|| black_box(&query).matches(black_box(&full)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("distance", size), &size, |b, _| {
            b.iter(|| black_box(&query).distance(black_box(&full)).unwrap());
        });
    }

    group.finish();
}

fn bench_approximate_log2(c: &mut Criterion) {
    let shape = Shape::new(10_000, 100).unwrap();
    let prototype = random_prototype(10_000);

    c.bench_function("approximate_log2_uncached", |b| {
        b.iter(|| prototype.materialize(&shape).approximate_log2());
    });
}

fn bench_counting_round_trip(c: &mut Criterion) {
    let mut group = c.benchmark_group("counting");

    for &size in &SIZES[..3] {
        let shape = Shape::new(size, 100).unwrap();
        let counting = random_prototype(size as usize).counting(&shape);
        let other = random_prototype(size as usize / 10 + 1).materialize(&shape);

        group.bench_with_input(BenchmarkId::new("merge_remove", size), &size, |b, _| {
            b.iter(|| {
                counting
                    .merge(black_box(&other))
                    .unwrap()
                    .remove(black_box(&other))
                    .unwrap()
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_materialize_by_size,
    bench_build_prototype,
    bench_match_and_distance,
    bench_approximate_log2,
    bench_counting_round_trip,
);

criterion_main!(benches);
