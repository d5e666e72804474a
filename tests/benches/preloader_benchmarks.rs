//! # Classpath Preloader Benchmarks
//!
//! | Operation | Expected cost |
//! |-----------|---------------|
//! | `insert` | k hash positions, one bit write each |
//! | `might_contain` | at most k bit reads, often fewer on a miss |
//! | guarded `find` miss | one store query, no delegate call |
//! | build | linear in enumerated paths |

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;

use cp_preloader::{
    ClasspathPreloader, GuardedFinder, MembershipStore, PreloaderConfig, ResourceFinder,
};

fn classpath(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| format!("org/example/module{}/pages/Page{}.html", i % 64, i))
        .collect()
}

/// Finder paying a hash lookup per call, standing in for a filesystem stat
struct SetFinder(HashSet<String>);

impl ResourceFinder for SetFinder {
    type Scope = ();
    type Resource = usize;

    fn find(&self, _scope: &(), path: &str) -> Option<usize> {
        self.0.get(path).map(String::len)
    }
}

// ============================================================================
// Membership store
// ============================================================================

fn bench_store_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-store-insert");

    for size in [1_000usize, 10_000, 100_000] {
        let paths = classpath(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), &paths, |b, paths| {
            b.iter(|| {
                let mut store = MembershipStore::new(paths.len(), 0.01).unwrap();
                for path in paths {
                    store.insert(path);
                }
                black_box(store.bits_set())
            })
        });
    }

    group.finish();
}

fn bench_store_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("membership-store-query");

    let paths = classpath(100_000);
    let mut store = MembershipStore::new(paths.len(), 0.01).unwrap();
    for path in &paths {
        store.insert(path);
    }

    let mut rng = rand::thread_rng();
    let hits: Vec<&String> = (0..1_000)
        .map(|_| &paths[rng.gen_range(0..paths.len())])
        .collect();
    let misses: Vec<String> = (0..1_000)
        .map(|i| format!("org/example/missing/Page{}_de_CH.html", i))
        .collect();

    group.throughput(Throughput::Elements(1_000));
    group.bench_function("might_contain_hit", |b| {
        b.iter(|| hits.iter().filter(|p| store.might_contain(p)).count())
    });
    group.bench_function("might_contain_miss", |b| {
        b.iter(|| misses.iter().filter(|p| store.might_contain(p)).count())
    });

    group.finish();
}

// ============================================================================
// Guarded lookups
// ============================================================================

fn bench_guarded_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("guarded-finder");

    let paths = classpath(50_000);
    let config = PreloaderConfig::new(paths.len(), 0.01).unwrap();
    let preloader = ClasspathPreloader::build(&config, &paths).unwrap();
    let delegate = Arc::new(SetFinder(paths.iter().cloned().collect()));
    let guarded = GuardedFinder::new(Arc::clone(&delegate), Arc::clone(preloader.store()), "");

    let miss = "org/example/module3/pages/Page3_fr_CA.html";
    let hit = paths[3].as_str();

    group.bench_function("unguarded_miss", |b| {
        b.iter(|| black_box(delegate.find(&(), black_box(miss))))
    });
    group.bench_function("guarded_miss", |b| {
        b.iter(|| black_box(guarded.find(&(), black_box(miss))))
    });
    group.bench_function("guarded_hit", |b| {
        b.iter(|| black_box(guarded.find(&(), black_box(hit))))
    });

    group.finish();
}

// ============================================================================
// Build
// ============================================================================

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("preloader-build");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let paths = classpath(200_000);
    let config = PreloaderConfig::new(paths.len(), 0.01).unwrap();
    let shards: Vec<Vec<String>> = paths.chunks(25_000).map(<[String]>::to_vec).collect();

    group.throughput(Throughput::Elements(paths.len() as u64));
    group.bench_function("sequential", |b| {
        b.iter(|| ClasspathPreloader::build(&config, &paths).unwrap().report().paths_found)
    });
    group.bench_function("parallel", |b| {
        b.iter(|| {
            ClasspathPreloader::build_parallel(&config, &shards)
                .unwrap()
                .report()
                .paths_found
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_store_insert,
    bench_store_query,
    bench_guarded_find,
    bench_build
);
criterion_main!(benches);
