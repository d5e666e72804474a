//! Archive Adapters
//!
//! Dependency jars and other zip archives on the classpath. The enumerator
//! reads the central directory once during the scan; the finder reopens the
//! archive on every lookup, the cost a `GuardedFinder` saves on misses.

use std::fs::File;
use std::path::{Path, PathBuf};

use zip::ZipArchive;

use super::fs_finder::FsResource;
use crate::domain::{normalize_prefix, qualify};
use crate::error::EnumerationError;
use crate::ports::{PathEnumerator, ResourceFinder};

/// Whether a classpath root names an archive rather than a directory
pub fn is_archive(root: &Path) -> bool {
    root.is_file()
}

/// Lists every file entry of one archive
#[derive(Clone, Debug)]
pub struct ArchiveEnumerator {
    archive: PathBuf,
}

impl ArchiveEnumerator {
    /// Enumerate entries of the archive at `archive`
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self {
            archive: archive.into(),
        }
    }

    /// The archive file
    pub fn archive(&self) -> &Path {
        &self.archive
    }

    fn open(&self) -> Result<ZipArchive<File>, EnumerationError> {
        let file = File::open(&self.archive).map_err(|source| EnumerationError::Io {
            path: self.archive.clone(),
            source,
        })?;
        ZipArchive::new(file).map_err(|source| EnumerationError::Archive {
            path: self.archive.clone(),
            source,
        })
    }
}

impl PathEnumerator for ArchiveEnumerator {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        let mut archive = self.open()?;
        for index in 0..archive.len() {
            // Raw access skips decryption setup; only the name is needed
            let entry = archive
                .by_index_raw(index)
                .map_err(|source| EnumerationError::Archive {
                    path: self.archive.clone(),
                    source,
                })?;
            if entry.is_dir() {
                continue;
            }
            sink(entry.name());
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.archive.display().to_string()
    }
}

/// Finder resolving entries of one archive, optionally below a prefix
#[derive(Clone, Debug)]
pub struct ArchiveResourceFinder {
    archive: PathBuf,
    prefix: String,
}

impl ArchiveResourceFinder {
    /// Finder resolving entries at the archive root
    pub fn new(archive: impl Into<PathBuf>) -> Self {
        Self::with_prefix(archive, "")
    }

    /// Finder resolving entries below `prefix`
    pub fn with_prefix(archive: impl Into<PathBuf>, prefix: &str) -> Self {
        Self {
            archive: archive.into(),
            prefix: prefix.to_string(),
        }
    }
}

impl ResourceFinder for ArchiveResourceFinder {
    type Scope = ();
    type Resource = FsResource;

    fn find(&self, _scope: &(), path: &str) -> Option<FsResource> {
        let name = qualify(&normalize_prefix(&self.prefix), path);
        let file = File::open(&self.archive).ok()?;
        let mut archive = ZipArchive::new(file).ok()?;
        let index = archive.index_for_name(&name)?;
        let entry = archive.by_index_raw(index).ok()?;

        entry.is_file().then(|| FsResource {
            path: self.archive.join(&name),
            len: entry.size(),
        })
    }

    fn classpath_prefix(&self) -> Option<&str> {
        Some(&self.prefix)
    }
}
