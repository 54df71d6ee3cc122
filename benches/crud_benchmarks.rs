use balanced_bst::{Avl, Balance, RangeFlags, Scapegoat, SearchTree, Splay, TraversalOrder, Unbalanced};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;

const N: usize = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

fn ordered_keys(n: usize) -> Vec<i64> {
    (0..n as i64).collect()
}

fn random_keys(n: usize) -> Vec<i64> {
    // Use a simple LCG for deterministic pseudo-random sequence
    let mut keys = Vec::with_capacity(n);
    let mut x: u64 = 12345;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        keys.push((x >> 33) as i64);
    }
    keys
}

fn insert_all<B: Balance + Default>(keys: &[i64]) -> SearchTree<i64, i64, B> {
    let mut tree = SearchTree::default();
    for &k in keys {
        tree.set(k, k);
    }
    tree
}

fn get_all<B: Balance>(tree: &mut SearchTree<i64, i64, B>, keys: &[i64]) -> i64 {
    let mut sum = 0i64;
    for k in keys {
        if let Some(&v) = tree.try_get(k) {
            sum = sum.wrapping_add(v);
        }
    }
    sum
}

// ─── Insert ─────────────────────────────────────────────────────────────────

fn bench_insert_ordered(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let mut group = c.benchmark_group("insert_ordered");

    // The unbalanced tree degenerates to a list on ordered input and is left out.
    fn run<B: Balance + Default>(b: &mut criterion::Bencher<'_>, keys: &[i64]) {
        b.iter(|| insert_all::<B>(keys));
    }
    group.bench_function(BenchmarkId::new("Avl", N), |b| run::<Avl>(b, &keys));
    group.bench_function(BenchmarkId::new("Scapegoat", N), |b| run::<Scapegoat>(b, &keys));
    group.bench_function(BenchmarkId::new("Splay", N), |b| run::<Splay>(b, &keys));

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

fn bench_insert_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("insert_random");

    group.bench_function(BenchmarkId::new("Unbalanced", N), |b| b.iter(|| insert_all::<Unbalanced>(&keys)));
    group.bench_function(BenchmarkId::new("Avl", N), |b| b.iter(|| insert_all::<Avl>(&keys)));
    group.bench_function(BenchmarkId::new("Scapegoat", N), |b| b.iter(|| insert_all::<Scapegoat>(&keys)));
    group.bench_function(BenchmarkId::new("Splay", N), |b| b.iter(|| insert_all::<Splay>(&keys)));

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

fn bench_bulk_build(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("bulk_build_random");

    group.bench_function(BenchmarkId::new("Avl", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<SearchTree<i64, i64, Avl>>());
    });

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| keys.iter().map(|&k| (k, k)).collect::<BTreeMap<i64, i64>>());
    });

    group.finish();
}

// ─── Get ────────────────────────────────────────────────────────────────────

fn bench_get_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut unbalanced = insert_all::<Unbalanced>(&keys);
    let mut avl = insert_all::<Avl>(&keys);
    let mut scapegoat = insert_all::<Scapegoat>(&keys);
    let mut splay = insert_all::<Splay>(&keys);
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("get_random");

    group.bench_function(BenchmarkId::new("Unbalanced", N), |b| b.iter(|| get_all(&mut unbalanced, &keys)));
    group.bench_function(BenchmarkId::new("Avl", N), |b| b.iter(|| get_all(&mut avl, &keys)));
    group.bench_function(BenchmarkId::new("Scapegoat", N), |b| b.iter(|| get_all(&mut scapegoat, &keys)));
    group.bench_function(BenchmarkId::new("Splay", N), |b| b.iter(|| get_all(&mut splay, &keys)));

    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for k in &keys {
                if let Some(&v) = bt_map.get(k) {
                    sum = sum.wrapping_add(v);
                }
            }
            sum
        });
    });

    group.finish();
}

fn bench_get_hot_key(c: &mut Criterion) {
    let keys = random_keys(N);
    let hot = keys[N / 3];
    let mut avl = insert_all::<Avl>(&keys);
    let mut splay = insert_all::<Splay>(&keys);

    let mut group = c.benchmark_group("get_hot_key");

    group.bench_function(BenchmarkId::new("Avl", N), |b| b.iter(|| avl.try_get(black_box(&hot)).copied()));
    group.bench_function(BenchmarkId::new("Splay", N), |b| b.iter(|| splay.try_get(black_box(&hot)).copied()));

    group.finish();
}

// ─── Remove ─────────────────────────────────────────────────────────────────

fn bench_remove_random(c: &mut Criterion) {
    let keys = random_keys(N);
    let mut group = c.benchmark_group("remove_random");

    fn run<B: Balance + Default + Clone>(b: &mut criterion::Bencher<'_>, keys: &[i64]) {
        let tree = insert_all::<B>(keys);
        b.iter(|| {
            let mut tree = tree.clone();
            for k in keys {
                tree.remove(k);
            }
            tree
        });
    }
    group.bench_function(BenchmarkId::new("Unbalanced", N), |b| run::<Unbalanced>(b, &keys));
    group.bench_function(BenchmarkId::new("Avl", N), |b| run::<Avl>(b, &keys));
    group.bench_function(BenchmarkId::new("Scapegoat", N), |b| run::<Scapegoat>(b, &keys));
    group.bench_function(BenchmarkId::new("Splay", N), |b| run::<Splay>(b, &keys));

    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| {
            let mut map = bt_map.clone();
            for k in &keys {
                map.remove(k);
            }
            map
        });
    });

    group.finish();
}

// ─── Iteration and range queries ────────────────────────────────────────────

fn bench_iter(c: &mut Criterion) {
    let keys = random_keys(N);
    let avl = insert_all::<Avl>(&keys);
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();

    let mut group = c.benchmark_group("iter");

    group.bench_function(BenchmarkId::new("Avl", N), |b| b.iter(|| avl.values().fold(0i64, |acc, &v| acc.wrapping_add(v))));
    group.bench_function(BenchmarkId::new("Avl/post_order", N), |b| {
        b.iter(|| avl.values_ordered(TraversalOrder::PostOrder, false).fold(0i64, |acc, &v| acc.wrapping_add(v)));
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.values().fold(0i64, |acc, &v| acc.wrapping_add(v)));
    });

    group.finish();
}

fn bench_range(c: &mut Criterion) {
    let keys = ordered_keys(N);
    let avl: SearchTree<i64, i64, Avl> = keys.iter().map(|&k| (k, k)).collect();
    let bt_map: BTreeMap<i64, i64> = keys.iter().map(|&k| (k, k)).collect();
    let (lo, hi) = (N as i64 / 4, N as i64 / 2);

    let mut group = c.benchmark_group("range_quarter");

    group.bench_function(BenchmarkId::new("Avl", N), |b| {
        b.iter(|| {
            avl.range_query(&lo, &hi, RangeFlags::INCLUDE_LEFT, TraversalOrder::InOrder, false)
                .fold(0i64, |acc, (_, &v)| acc.wrapping_add(v))
        });
    });
    group.bench_function(BenchmarkId::new("BTreeMap", N), |b| {
        b.iter(|| bt_map.range(lo..hi).fold(0i64, |acc, (_, &v)| acc.wrapping_add(v)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_insert_ordered,
    bench_insert_random,
    bench_bulk_build,
    bench_get_random,
    bench_get_hot_key,
    bench_remove_random,
    bench_iter,
    bench_range,
);
criterion_main!(benches);
