//! # Concurrent Lookups
//!
//! A frozen store is read by many threads at once with no locking. These
//! flows hammer one `Arc<MembershipStore>` through guarded finders and check
//! every thread sees the single-threaded answers.

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;

    use cp_preloader::{ClasspathPreloader, GuardedFinder, PreloaderConfig, ResourceFinder};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rayon::prelude::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Finder over a fixed path set, counting delegate calls across threads
    struct CountingFinder {
        existing: HashSet<String>,
        calls: AtomicUsize,
    }

    impl ResourceFinder for CountingFinder {
        type Scope = ();
        type Resource = String;

        fn find(&self, _scope: &(), path: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::Relaxed);
            self.existing.get(path).cloned()
        }

        fn classpath_prefix(&self) -> Option<&str> {
            Some("")
        }
    }

    fn classpath(count: usize) -> Vec<String> {
        (0..count)
            .map(|i| format!("org/example/module{}/Resource{}.properties", i % 17, i))
            .collect()
    }

    /// Present and absent paths interleaved, deterministic per seed
    fn queries(paths: &[String], count: usize, seed: u64) -> Vec<String> {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..count)
            .map(|_| {
                if rng.gen_bool(0.5) {
                    paths[rng.gen_range(0..paths.len())].clone()
                } else {
                    format!("org/example/missing/Resource{}_de.properties", rng.gen::<u32>())
                }
            })
            .collect()
    }

    fn build(paths: &[String]) -> ClasspathPreloader {
        let config = PreloaderConfig::new(paths.len() * 2, 0.01).unwrap();
        ClasspathPreloader::build(&config, paths).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_rayon_readers_match_single_threaded_answers() {
        let paths = classpath(5_000);
        let preloader = build(&paths);
        let queries = queries(&paths, 20_000, 7);

        let expected: Vec<bool> = queries.iter().map(|q| preloader.might_contain(q)).collect();
        let parallel: Vec<bool> = queries
            .par_iter()
            .map(|q| preloader.might_contain(q))
            .collect();

        assert_eq!(expected, parallel);
    }

    #[test]
    fn test_guarded_finder_shared_across_threads() {
        let paths = classpath(2_000);
        let preloader = build(&paths);
        let finder = Arc::new(preloader.guard(CountingFinder {
            existing: paths.iter().cloned().collect(),
            calls: AtomicUsize::new(0),
        }));

        let per_thread = 2_500;
        let workers: Vec<_> = (0..8u64)
            .map(|seed| {
                let finder = Arc::clone(&finder);
                let queries = queries(&paths, per_thread, seed);
                let present: HashSet<String> = paths.iter().cloned().collect();
                thread::spawn(move || {
                    let mut hits = 0usize;
                    for query in &queries {
                        let found = finder.find(&(), query);
                        // Never a false negative, never a phantom hit
                        assert_eq!(found.is_some(), present.contains(query), "{}", query);
                        hits += found.is_some() as usize;
                    }
                    hits
                })
            })
            .collect();

        let hits: usize = workers.into_iter().map(|w| w.join().unwrap()).sum();
        let calls = finder.delegate().calls.load(Ordering::Relaxed);

        // Every hit went to the delegate; most misses did not
        assert!(calls >= hits);
        let misses = 8 * per_thread - hits;
        assert!(calls - hits < misses / 10, "{} false positives of {} misses", calls - hits, misses);
    }

    #[test]
    fn test_guards_outlive_the_preloader() {
        let paths = classpath(100);
        let guard = {
            let preloader = build(&paths);
            GuardedFinder::new(
                CountingFinder {
                    existing: paths.iter().cloned().collect(),
                    calls: AtomicUsize::new(0),
                },
                Arc::clone(preloader.store()),
                "",
            )
        };

        assert_eq!(Arc::strong_count(guard.store()), 1);
        thread::scope(|s| {
            for chunk in paths.chunks(25) {
                let guard = &guard;
                s.spawn(move || {
                    for path in chunk {
                        assert_eq!(guard.find(&(), path).as_deref(), Some(path.as_str()));
                    }
                });
            }
        });
        assert_eq!(guard.delegate().calls.load(Ordering::Relaxed), 100);
    }
}
