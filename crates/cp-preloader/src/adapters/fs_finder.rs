//! Filesystem Resource Finder
//!
//! Resolves resource paths against a classpath directory, optionally below
//! a fixed prefix. Every call stats the filesystem, which is the probe a
//! `GuardedFinder` saves on definite misses.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::{normalize_prefix, qualify};
use crate::ports::ResourceFinder;

/// A resource found on disk
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FsResource {
    /// Location of the file; for archive entries the archive path joined
    /// with the entry name
    pub path: PathBuf,
    /// File length in bytes
    pub len: u64,
}

/// Finder backed by one classpath directory
#[derive(Clone, Debug)]
pub struct FsResourceFinder {
    root: PathBuf,
    prefix: String,
}

impl FsResourceFinder {
    /// Finder resolving paths directly below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_prefix(root, "")
    }

    /// Finder resolving paths below `root/prefix`
    pub fn with_prefix(root: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            root: root.into(),
            prefix: prefix.to_string(),
        }
    }

    /// Classpath root directory
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl ResourceFinder for FsResourceFinder {
    /// Lookups are not relative to anything on a plain filesystem
    type Scope = ();
    type Resource = FsResource;

    fn find(&self, _scope: &(), path: &str) -> Option<FsResource> {
        let qualified = qualify(&normalize_prefix(&self.prefix), path);
        let relative = Path::new(&qualified);
        if !is_contained(relative) {
            return None;
        }

        let full = self.root.join(relative);
        let metadata = fs::metadata(&full).ok()?;
        metadata.is_file().then(|| FsResource {
            path: full,
            len: metadata.len(),
        })
    }

    fn classpath_prefix(&self) -> Option<&str> {
        Some(&self.prefix)
    }
}

/// Whether joining `relative` onto a root stays below that root
///
/// Only plain names are accepted: no root, drive prefix, `.` or `..`.
pub fn is_contained(relative: &Path) -> bool {
    relative
        .components()
        .all(|component| matches!(component, Component::Normal(_)))
}
