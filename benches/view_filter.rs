//! View Filter Benchmarks
//!
//! Measures deriving the visible set from large loaded collections, with and
//! without an active search term.
//!
//! Run with: cargo bench --bench view_filter

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pokedex_browser::catalog::{visible, Collection, DetailRecord, Entity, SearchTerm};

fn collection_of(size: usize) -> Collection {
    let mut collection = Collection::new();
    for id in 1..=size as u64 {
        let detail = DetailRecord::new(format!("mon-{}", id), id)
            .with_measurements(100, 10)
            .with_types(["normal"])
            .with_abilities(["run-away"]);
        collection.insert(Entity::from_detail(detail, format!("u/{}", id)));
    }
    collection
}

fn bench_visible_by_size(c: &mut Criterion) {
    let mut group = c.benchmark_group("view_filter_by_size");

    for size in [100, 1_000, 10_000] {
        let collection = collection_of(size);
        let all = SearchTerm::empty();
        let one = SearchTerm::parse(&format!("MON-{}", size / 2));

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("show_all", size), &size, |b, _| {
            b.iter(|| black_box(visible(black_box(&collection), &all)));
        });
        group.bench_with_input(BenchmarkId::new("exact_name", size), &size, |b, _| {
            b.iter(|| black_box(visible(black_box(&collection), &one)));
        });
    }

    group.finish();
}

fn bench_collection_lookup(c: &mut Criterion) {
    let collection = collection_of(10_000);
    c.bench_function("collection_contains_10k", |b| {
        b.iter(|| black_box(collection.contains(black_box("mon-9999"))));
    });
}

criterion_group!(benches, bench_visible_by_size, bench_collection_lookup);
criterion_main!(benches);
