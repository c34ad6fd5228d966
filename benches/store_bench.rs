use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};
use propmatch::{parse_properties, props, PatternStore, Properties};

const PATTERNS: usize = 100;

fn single_property(i: usize) -> Properties {
    props(&[(format!("p{i:03}").as_str(), format!("v{i}").as_str())])
}

fn populated(count: usize) -> PatternStore<usize> {
    let mut store = PatternStore::new();
    for i in 0..count {
        store.add(single_property(i), i);
    }
    store
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let patterns: Vec<Properties> = (0..PATTERNS).map(single_property).collect();

    group.throughput(Throughput::Elements(PATTERNS as u64));
    group.bench_function(format!("single_property_{PATTERNS}"), |b| {
        b.iter_batched(
            || patterns.clone(),
            |patterns| {
                let mut store = PatternStore::new();
                for (i, pattern) in patterns.into_iter().enumerate() {
                    store.add(pattern, i);
                }
                store
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    let store = populated(PATTERNS);
    let hit = single_property(PATTERNS / 2);
    let miss = parse_properties("p050:nope");
    let noisy = parse_properties("a:1, p050:v50, zz:9");

    group.bench_function("hit", |b| b.iter(|| store.find(black_box(&hit))));
    group.bench_function("miss", |b| b.iter(|| store.find(black_box(&miss))));
    group.bench_function("extra_properties", |b| {
        b.iter(|| store.find(black_box(&noisy)))
    });
    group.bench_function("exact_hit", |b| {
        b.iter(|| store.find_exact(black_box(&hit)))
    });
    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("list");
    let store = populated(PATTERNS);
    let wildcard = parse_properties("p050:v5*");

    group.bench_function("all", |b| b.iter(|| store.list(None, false)));
    group.bench_function("glob", |b| {
        b.iter(|| store.list(Some(black_box(&wildcard)), false))
    });
    group.finish();
}

criterion_group!(benches, bench_add, bench_find, bench_list);
criterion_main!(benches);
