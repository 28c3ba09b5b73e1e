use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use wgb_tree::{Order, WgbTreeMap};

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Simple LCG for a deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_put(c: &mut Criterion) {
    for (name, keys) in [("ordered", ordered_keys(N)), ("random", random_keys(N))] {
        let mut group = c.benchmark_group(format!("map_put_{name}"));

        group.bench_function(BenchmarkId::new("WgbTreeMap", N), |b| {
            b.iter(|| {
                let map = WgbTreeMap::new();
                for &k in &keys {
                    map.put(k, k);
                }
                map
            });
        });

        group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &k in &keys {
                    map.insert(k, k);
                }
                map
            });
        });

        group.finish();
    }
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let wgb_map: WgbTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("map_get_random");

    group.bench_function(BenchmarkId::new("WgbTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if wgb_map.contains_key(k) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut hits = 0usize;
            for k in &keys {
                if bt_map.contains_key(k) {
                    hits += 1;
                }
            }
            hits
        });
    });

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("map_remove_random");

    group.bench_function(BenchmarkId::new("WgbTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<WgbTreeMap<i64, i64>>(),
            |map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter_batched(
            || keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>(),
            |mut map| {
                for k in &keys {
                    map.remove(k);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

// ─── Range queries ──────────────────────────────────────────────────────────

fn bench_ranges(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let wgb_map: WgbTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let (low, high) = (N as i64 / 4, 3 * N as i64 / 4);

    let mut group = c.benchmark_group("map_between");

    group.bench_function(BenchmarkId::new("WgbTreeMap", N), |b| {
        b.iter(|| wgb_map.between(&low, &high, Order::Ascending).len());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.range(low..=high).map(|(k, v)| (*k, *v)).collect::<Vec<_>>().len());
    });

    group.finish();

    let mut group = c.benchmark_group("map_all_descending");

    group.bench_function(BenchmarkId::new("WgbTreeMap", N), |b| {
        b.iter(|| wgb_map.all_descending().len());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.iter().rev().map(|(k, v)| (*k, *v)).collect::<Vec<_>>().len());
    });

    group.finish();
}

criterion_group!(benches, bench_put, bench_get_random, bench_remove_random, bench_ranges);
criterion_main!(benches);
