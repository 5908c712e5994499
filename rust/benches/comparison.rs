use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use bptree_set::{BPTreeSet, TrackingResource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

const SEED: u64 = 42;

fn shuffled_keys(size: usize) -> Vec<u64> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut keys: Vec<u64> = (0..size as u64).collect();
    for i in (1..keys.len()).rev() {
        keys.swap(i, rng.gen_range(0..=i));
    }
    keys
}

fn bench_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("insertion");
    group.sample_size(30);

    for size in [1_000usize, 10_000, 100_000] {
        let keys = shuffled_keys(size);

        group.bench_with_input(BenchmarkId::new("bptree_set", size), &keys, |b, keys| {
            b.iter(|| {
                let resource = TrackingResource::new();
                let mut tree = BPTreeSet::with_capacity(64, &resource).unwrap();
                for &k in keys {
                    black_box(tree.insert(k));
                }
                black_box(tree.len())
            })
        });

        group.bench_with_input(BenchmarkId::new("std_btreeset", size), &keys, |b, keys| {
            b.iter(|| {
                let mut set = BTreeSet::new();
                for &k in keys {
                    black_box(set.insert(k));
                }
                black_box(set.len())
            })
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");

    for size in [10_000usize, 100_000] {
        let keys = shuffled_keys(size);
        let resource = TrackingResource::new();
        let mut tree = BPTreeSet::with_capacity(64, &resource).unwrap();
        let mut set = BTreeSet::new();
        for &k in &keys {
            tree.insert(k);
            set.insert(k);
        }
        let probes: Vec<u64> = keys.iter().take(1000).copied().collect();

        group.bench_with_input(BenchmarkId::new("bptree_set", size), &probes, |b, probes| {
            b.iter(|| {
                let mut hits = 0usize;
                for k in probes {
                    if tree.contains(black_box(k)) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });

        group.bench_with_input(BenchmarkId::new("std_btreeset", size), &probes, |b, probes| {
            b.iter(|| {
                let mut hits = 0usize;
                for k in probes {
                    if set.contains(black_box(k)) {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

fn bench_rank_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_queries");

    let size = 100_000usize;
    let keys = shuffled_keys(size);
    let resource = TrackingResource::new();
    let mut tree = BPTreeSet::with_capacity(64, &resource).unwrap();
    for &k in &keys {
        tree.insert(k);
    }
    let probes: Vec<u64> = keys.iter().take(1000).copied().collect();

    group.bench_function("rank", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for k in &probes {
                total = total.wrapping_add(tree.rank(black_box(k)));
            }
            black_box(total)
        })
    });

    group.bench_function("get_by_rank", |b| {
        b.iter(|| {
            let mut total = 0u64;
            for k in &probes {
                if let Some(v) = tree.get_by_rank(black_box(*k as usize)) {
                    total = total.wrapping_add(*v);
                }
            }
            black_box(total)
        })
    });

    group.finish();
}

fn bench_rank_windows(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_windows");

    let size = 100_000usize;
    let keys = shuffled_keys(size);
    let resource = TrackingResource::new();
    let mut tree = BPTreeSet::with_capacity(64, &resource).unwrap();
    let mut set = BTreeSet::new();
    for &k in &keys {
        tree.insert(k);
        set.insert(k);
    }

    for window in [100usize, 1_000, 10_000] {
        let low = size / 4;
        let high = low + window - 1;

        group.bench_with_input(BenchmarkId::new("bptree_set", window), &window, |b, _| {
            b.iter(|| {
                let mut total = 0u64;
                tree.iterate_range(low, high, |k| total = total.wrapping_add(*k));
                black_box(total)
            })
        });

        // The std set has no ordinal access; skipping is the closest analogue.
        group.bench_with_input(BenchmarkId::new("std_btreeset", window), &window, |b, _| {
            b.iter(|| {
                let total: u64 = set.iter().skip(low).take(window).sum();
                black_box(total)
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_insertion,
    bench_lookup,
    bench_rank_queries,
    bench_rank_windows
);
criterion_main!(benches);
