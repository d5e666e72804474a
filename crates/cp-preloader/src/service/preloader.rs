//! Classpath Preloader
//!
//! Build orchestration: scans the classpath once, freezes the membership
//! store, and hands back guarded replacements for the host's
//! classpath-backed finders.
//!
//! Startup trades scan time and a fixed amount of memory for
//! first-request latency. A classpath that cannot be fully enumerated is a
//! fatal build error: a partial store would deny resources that exist.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, trace};

use super::guarded_finder::GuardedFinder;
use crate::domain::{MembershipStore, PreloaderConfig};
use crate::error::PreloadError;
use crate::ports::{PathEnumerator, ResourceFinder};

/// Summary of a completed build pass
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BuildReport {
    /// Paths yielded by the enumerators, duplicates included
    pub paths_found: usize,
    /// Distinct paths, known only when the plain path set is retained
    pub distinct_paths: Option<usize>,
    /// Number of classpath elements scanned
    pub sources_scanned: usize,
    /// Filter-sized stores allocated during the scan, 1 when sequential
    pub stores_allocated: usize,
    /// Wall time of the scan in milliseconds
    pub elapsed_ms: u64,
    /// Bytes of filter bit storage
    pub filter_bytes: usize,
    /// Filter size in bits
    pub size_bits: usize,
    /// Hash positions per path
    pub hash_count: usize,
    /// Capacity the filter was sized for
    pub expected_items: usize,
    /// Configured false positive rate
    pub target_fpr: f64,
    /// False positive rate implied by the actual fill
    pub estimated_fpr: f64,
    /// Approximate heap bytes of the plain path set, when retained
    pub plain_set_bytes: Option<usize>,
}

/// Store and counters filled by one scanning worker
struct PartialScan {
    store: MembershipStore,
    plain_paths: Option<HashSet<String>>,
    paths_found: usize,
    /// Stores allocated for this result, merged ones included
    stores_allocated: usize,
}

impl PartialScan {
    fn new(config: &PreloaderConfig) -> Result<Self, PreloadError> {
        Ok(Self {
            store: MembershipStore::from_config(config)?,
            plain_paths: config.retain_plain_paths.then(HashSet::new),
            paths_found: 0,
            stores_allocated: 1,
        })
    }

    /// OR another worker's result into this one, dropping its store
    fn absorb(&mut self, other: PartialScan) -> Result<(), PreloadError> {
        self.store.merge(&other.store)?;
        self.paths_found += other.paths_found;
        self.stores_allocated += other.stores_allocated;
        if let (Some(all), Some(part)) = (self.plain_paths.as_mut(), other.plain_paths) {
            all.extend(part);
        }
        Ok(())
    }
}

/// Frozen classpath snapshot shared by every guarded finder
#[derive(Debug)]
pub struct ClasspathPreloader {
    store: Arc<MembershipStore>,
    plain_paths: Option<HashSet<String>>,
    report: BuildReport,
}

impl ClasspathPreloader {
    /// Scan one enumerator to completion and freeze the result
    pub fn build<E>(config: &PreloaderConfig, enumerator: &E) -> Result<Self, PreloadError>
    where
        E: PathEnumerator + ?Sized,
    {
        config.validate()?;
        let started = Instant::now();

        let mut partial = PartialScan::new(config)?;
        scan_into(&mut partial, enumerator)?;
        Ok(Self::freeze(config, partial, 1, started.elapsed()))
    }

    /// Scan several classpath elements in parallel and freeze the union
    ///
    /// Elements are split into one chunk per rayon worker. Each chunk is
    /// scanned sequentially into a single store of identical dimensions,
    /// and chunk stores are OR-merged while reducing, so the frozen bits
    /// equal a sequential build over the same paths. Peak memory is bounded
    /// by the worker count, not by the number of elements.
    pub fn build_parallel<E>(config: &PreloaderConfig, enumerators: &[E]) -> Result<Self, PreloadError>
    where
        E: PathEnumerator + Sync,
    {
        config.validate()?;
        let started = Instant::now();

        let workers = rayon::current_num_threads().max(1);
        let chunk_len = enumerators.len().div_ceil(workers).max(1);
        info!(
            sources = enumerators.len(),
            workers,
            chunk_len,
            "scanning classpath in parallel"
        );

        let merged = enumerators
            .par_chunks(chunk_len)
            .map(|chunk| {
                let mut partial = PartialScan::new(config)?;
                for enumerator in chunk {
                    scan_into(&mut partial, enumerator)?;
                }
                Ok::<_, PreloadError>(partial)
            })
            .try_reduce_with(|mut left, right| {
                left.absorb(right)?;
                Ok(left)
            })
            .transpose()?;

        let merged = match merged {
            Some(partial) => partial,
            None => PartialScan::new(config)?,
        };
        Ok(Self::freeze(config, merged, enumerators.len(), started.elapsed()))
    }

    /// Build the snapshot and rewrite the host's finder list
    ///
    /// Every finder that reports a `classpath_prefix` is replaced by a
    /// `GuardedFinder` sharing the frozen store; the rest pass through in
    /// their original order. The host installs the returned list in place
    /// of the one it handed over.
    #[allow(clippy::type_complexity)]
    pub fn configure<S, R, E>(
        finders: Vec<Box<dyn ResourceFinder<Scope = S, Resource = R>>>,
        config: &PreloaderConfig,
        enumerator: &E,
    ) -> Result<(Self, Vec<Box<dyn ResourceFinder<Scope = S, Resource = R>>>), PreloadError>
    where
        S: ?Sized + 'static,
        R: 'static,
        E: PathEnumerator + ?Sized,
    {
        let preloader = Self::build(config, enumerator)?;
        let finders = preloader.wrap_finders(finders);
        Ok((preloader, finders))
    }

    /// Replace classpath-backed finders with guarded ones
    pub fn wrap_finders<S, R>(
        &self,
        finders: Vec<Box<dyn ResourceFinder<Scope = S, Resource = R>>>,
    ) -> Vec<Box<dyn ResourceFinder<Scope = S, Resource = R>>>
    where
        S: ?Sized + 'static,
        R: 'static,
    {
        finders
            .into_iter()
            .map(|finder| {
                let prefix = finder.classpath_prefix().map(str::to_owned);
                match prefix {
                    Some(prefix) => {
                        debug!(prefix = %prefix, "wrapping classpath finder");
                        let guarded = GuardedFinder::new(finder, Arc::clone(&self.store), &prefix);
                        Box::new(guarded) as Box<dyn ResourceFinder<Scope = S, Resource = R>>
                    }
                    None => finder,
                }
            })
            .collect()
    }

    /// Guard a single finder with the prefix it reports
    pub fn guard<F: ResourceFinder>(&self, delegate: F) -> GuardedFinder<F> {
        GuardedFinder::from_delegate(delegate, Arc::clone(&self.store))
    }

    /// The frozen store
    pub fn store(&self) -> &Arc<MembershipStore> {
        &self.store
    }

    /// Statistics from the build pass
    pub fn report(&self) -> &BuildReport {
        &self.report
    }

    /// Whether a fully qualified path might be on the classpath
    pub fn might_contain(&self, path: &str) -> bool {
        self.store.might_contain(path)
    }

    /// Exact membership from the diagnostic plain set
    ///
    /// `None` unless `retain_plain_paths` was enabled.
    pub fn contains_exactly(&self, path: &str) -> Option<bool> {
        self.plain_paths.as_ref().map(|paths| paths.contains(path))
    }

    fn freeze(
        config: &PreloaderConfig,
        partial: PartialScan,
        sources_scanned: usize,
        elapsed: Duration,
    ) -> Self {
        let store = partial.store;
        let plain_set_bytes = partial.plain_paths.as_ref().map(approximate_heap_bytes);

        let report = BuildReport {
            paths_found: partial.paths_found,
            distinct_paths: partial.plain_paths.as_ref().map(HashSet::len),
            sources_scanned,
            stores_allocated: partial.stores_allocated,
            elapsed_ms: elapsed.as_millis() as u64,
            filter_bytes: store.size_bytes(),
            size_bits: store.size_bits(),
            hash_count: store.hash_count(),
            expected_items: config.expected_items,
            target_fpr: config.false_positive_rate,
            estimated_fpr: store.estimated_false_positive_rate(),
            plain_set_bytes,
        };

        info!(elapsed_ms = report.elapsed_ms, "scanning complete");
        info!(paths_found = report.paths_found, "found a total of {} files", report.paths_found);
        info!(
            filter_bytes = report.filter_bytes,
            hash_count = report.hash_count,
            estimated_fpr = report.estimated_fpr,
            "bloom filter using a total of {} bytes",
            report.filter_bytes
        );
        if let Some(bytes) = plain_set_bytes {
            info!(
                distinct_paths = report.distinct_paths,
                "hash set using a total of {} bytes", bytes
            );
        }

        Self {
            store: Arc::new(store),
            plain_paths: partial.plain_paths,
            report,
        }
    }
}

/// Enumerate one source into an existing partial scan
fn scan_into<E>(partial: &mut PartialScan, enumerator: &E) -> Result<(), PreloadError>
where
    E: PathEnumerator + ?Sized,
{
    let source = enumerator.describe();
    info!(source = %source, "scanning classpath");

    let mut found = 0usize;
    enumerator.enumerate(&mut |path: &str| {
        trace!(path, "found on classpath");
        partial.store.insert(path);
        if let Some(paths) = partial.plain_paths.as_mut() {
            paths.insert(path.to_owned());
        }
        found += 1;
    })?;
    partial.paths_found += found;

    debug!(
        source = %source,
        paths_found = found,
        "classpath element scanned"
    );
    Ok(())
}

/// Rough heap footprint of a string set: table slots plus string bodies
fn approximate_heap_bytes(paths: &HashSet<String>) -> usize {
    let slots = paths.capacity() * (std::mem::size_of::<String>() + 1);
    let bodies: usize = paths.iter().map(String::capacity).sum();
    slots + bodies
}
