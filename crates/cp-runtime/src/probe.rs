//! # Resource Probing
//!
//! Builds the host's finder chain (one filesystem or archive finder per
//! classpath root), rewrites it through the preloader, and resolves candidate paths
//! in chain order the way a resource locator would.

use std::path::{Path, PathBuf};

use cp_preloader::domain::{normalize_prefix, qualify};
use cp_preloader::adapters::is_archive;
use cp_preloader::{
    ArchiveResourceFinder, ClasspathPreloader, FsResource, FsResourceFinder, ResourceFinder,
};
use serde::Serialize;

/// Finder chain over the filesystem.
pub type FinderChain = Vec<Box<dyn ResourceFinder<Scope = (), Resource = FsResource>>>;

/// Outcome of resolving one candidate path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProbeResult {
    /// Path as requested, without prefix.
    pub path: String,
    /// Whether the membership store let the lookup through.
    pub might_exist: bool,
    /// File that satisfied the lookup, if any.
    pub resolved: Option<PathBuf>,
}

/// One unguarded finder per classpath root, in classpath order.
///
/// Archive roots get an archive finder, everything else a directory finder.
pub fn filesystem_chain<P: AsRef<Path>>(roots: &[P], prefix: &str) -> FinderChain {
    roots
        .iter()
        .map(|root| {
            let root = root.as_ref();
            if is_archive(root) {
                Box::new(ArchiveResourceFinder::with_prefix(root, prefix))
                    as Box<dyn ResourceFinder<Scope = (), Resource = FsResource>>
            } else {
                Box::new(FsResourceFinder::with_prefix(root, prefix))
            }
        })
        .collect()
}

/// Guarded chain: every classpath finder consults the store first.
pub fn guarded_chain<P: AsRef<Path>>(
    preloader: &ClasspathPreloader,
    roots: &[P],
    prefix: &str,
) -> FinderChain {
    preloader.wrap_finders(filesystem_chain(roots, prefix))
}

/// Resolve `path` through the chain, first hit wins.
pub fn probe(
    preloader: &ClasspathPreloader,
    chain: &[Box<dyn ResourceFinder<Scope = (), Resource = FsResource>>],
    prefix: &str,
    path: &str,
) -> ProbeResult {
    let might_exist = preloader.might_contain(&qualify(&normalize_prefix(prefix), path));
    let resolved = chain
        .iter()
        .find_map(|finder| finder.find(&(), path))
        .map(|resource| resource.path);

    ProbeResult {
        path: path.to_string(),
        might_exist,
        resolved,
    }
}
