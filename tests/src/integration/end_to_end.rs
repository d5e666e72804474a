//! # End-to-End Preloader Flow
//!
//! Enumerate → build → freeze → guarded lookups, with in-memory
//! enumerators and recording delegates.
//!
//! ## Flow Tested:
//!
//! 1. **Variant fallback**: only existing locale variants reach the delegate
//! 2. **Finder list rewrite**: classpath finders guarded, custom finders untouched
//! 3. **Prefixed finders**: store lookups qualified, delegate calls not

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use cp_preloader::{
        ClasspathPreloader, GuardedFinder, MembershipStore, PreloaderConfig, ResourceFinder,
    };

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Handle returned by the recording finder
    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Sentinel(&'static str);

    /// Delegate that knows a fixed set of paths and records every call
    struct RecordingFinder {
        prefix: Option<&'static str>,
        existing: HashSet<&'static str>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    impl RecordingFinder {
        fn new(prefix: Option<&'static str>, existing: &[&'static str]) -> Self {
            Self {
                prefix,
                existing: existing.iter().copied().collect(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn call_log(&self) -> Arc<Mutex<Vec<String>>> {
            Arc::clone(&self.calls)
        }
    }

    impl ResourceFinder for RecordingFinder {
        /// Name of the component the lookup is relative to
        type Scope = str;
        type Resource = Sentinel;

        fn find(&self, _scope: &str, path: &str) -> Option<Sentinel> {
            self.calls.lock().unwrap().push(path.to_string());
            self.existing.get(path).map(|p| Sentinel(*p))
        }

        fn classpath_prefix(&self) -> Option<&str> {
            self.prefix
        }
    }

    fn config() -> PreloaderConfig {
        PreloaderConfig::new(10_000, 0.01).unwrap()
    }

    // =============================================================================
    // FLOWS
    // =============================================================================

    #[test]
    fn test_variant_fallback_only_probes_existing_paths() {
        let enumerated = ["app/Page.html", "app/Page.properties"];
        let preloader = ClasspathPreloader::build(&config(), &enumerated[..]).unwrap();

        let delegate = RecordingFinder::new(Some(""), &enumerated);
        let calls = delegate.call_log();
        let finder = preloader.guard(delegate);

        assert_eq!(finder.find("Page", "app/Page.html"), Some(Sentinel("app/Page.html")));
        assert_eq!(finder.find("Page", "app/Page_de.html"), None);
        assert_eq!(
            finder.find("Page", "app/Page.properties"),
            Some(Sentinel("app/Page.properties"))
        );

        let calls = calls.lock().unwrap();
        assert_eq!(*calls, vec!["app/Page.html", "app/Page.properties"]);
    }

    #[test]
    fn test_locale_chain_prunes_missing_variants() {
        let enumerated = [
            "app/Page.html",
            "app/Page_de.properties",
            "app/Page.properties",
        ];
        let preloader = ClasspathPreloader::build(&config(), &enumerated[..]).unwrap();
        let delegate = RecordingFinder::new(Some(""), &enumerated);
        let calls = delegate.call_log();
        let finder = preloader.guard(delegate);

        // Most specific first, as a locale fallback resolver would try them
        let candidates = [
            "app/Page_de_CH_blue.properties",
            "app/Page_de_CH.properties",
            "app/Page_de.properties",
            "app/Page.properties",
        ];
        let first_hit = candidates.iter().find_map(|c| finder.find("Page", c));

        assert_eq!(first_hit, Some(Sentinel("app/Page_de.properties")));
        assert_eq!(*calls.lock().unwrap(), vec!["app/Page_de.properties"]);
    }

    #[test]
    fn test_configure_rewrites_only_classpath_finders() {
        let enumerated = [
            "subfolder/test.properties",
            "META-INF/services/org.example.Initializer",
            "org/example/Application.properties",
        ];

        let root = RecordingFinder::new(Some(""), &["org/example/Application.properties"]);
        let sub = RecordingFinder::new(Some("subfolder"), &["test.properties"]);
        let meta = RecordingFinder::new(Some("META-INF/"), &["services/org.example.Initializer"]);
        let custom = RecordingFinder::new(None, &["generated/Dynamic.html"]);
        let logs = [root.call_log(), sub.call_log(), meta.call_log(), custom.call_log()];

        let finders: Vec<Box<dyn ResourceFinder<Scope = str, Resource = Sentinel>>> = vec![
            Box::new(root),
            Box::new(sub),
            Box::new(meta),
            Box::new(custom),
        ];

        let (preloader, finders) =
            ClasspathPreloader::configure(finders, &config(), &enumerated[..]).unwrap();
        assert_eq!(preloader.report().paths_found, 3);

        assert!(finders[0].find("App", "org/example/Application.properties").is_some());
        assert!(finders[1].find("App", "test.properties").is_some());
        assert!(finders[2].find("App", "services/org.example.Initializer").is_some());
        // Custom finder was not in the scan but stays reachable
        assert!(finders[3].find("App", "generated/Dynamic.html").is_some());

        // A path that exists nowhere only reaches the unguarded finder
        for finder in &finders {
            assert!(finder.find("App", "i/dont/exist.properties").is_none());
        }
        for log in &logs[..3] {
            let log = log.lock().unwrap();
            assert!(!log.iter().any(|p| p == "i/dont/exist.properties"));
        }
        assert!(logs[3]
            .lock()
            .unwrap()
            .iter()
            .any(|p| p == "i/dont/exist.properties"));
    }

    #[test]
    fn test_many_guards_share_one_store() {
        let mut store = MembershipStore::new(1_000, 0.01).unwrap();
        store.insert("a/A.class");
        store.insert("b/B.class");
        let store = Arc::new(store);

        let guards: Vec<_> = ["a", "b"]
            .iter()
            .map(|&prefix| {
                GuardedFinder::new(
                    RecordingFinder::new(Some(prefix), &["A.class", "B.class"]),
                    Arc::clone(&store),
                    prefix,
                )
            })
            .collect();

        assert_eq!(Arc::strong_count(&store), 3);
        assert!(guards[0].find("x", "A.class").is_some());
        assert!(guards[0].find("x", "B.class").is_none());
        assert!(guards[1].find("x", "B.class").is_some());
        assert!(guards[1].find("x", "A.class").is_none());
    }
}
