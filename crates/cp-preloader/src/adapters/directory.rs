//! Directory Enumerator
//!
//! Lists every file under an exploded classpath directory as a
//! `/`-separated path relative to the root, the form resource lookups use.
//!
//! Symbolic links are followed by default. Filesystem finders resolve
//! through links, so a walk that skipped them would report linked
//! resources as absent.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::domain::SEPARATOR;
use crate::error::EnumerationError;
use crate::ports::PathEnumerator;

/// One classpath directory
#[derive(Clone, Debug)]
pub struct DirectoryEnumerator {
    root: PathBuf,
    follow_links: bool,
}

impl DirectoryEnumerator {
    /// Enumerate files below `root`, following symbolic links
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            follow_links: true,
        }
    }

    /// Whether to descend into symlinked directories
    ///
    /// Symlinked files are listed either way. With following disabled,
    /// files reachable only through a linked directory are not listed, so
    /// only turn it off when no finder resolves through such links.
    pub fn follow_links(mut self, follow: bool) -> Self {
        self.follow_links = follow;
        self
    }

    /// The classpath root
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Render a root-relative filesystem path in classpath form
///
/// Returns `None` for paths that are not valid UTF-8; such files cannot be
/// named by a resource lookup anyway.
pub fn to_classpath_path(relative: &Path) -> Option<String> {
    let mut out = String::new();
    for component in relative.components() {
        let part = component.as_os_str().to_str()?;
        if !out.is_empty() {
            out.push(SEPARATOR);
        }
        out.push_str(part);
    }
    Some(out)
}

/// A followed link whose target does not exist
fn is_dangling_link(error: &walkdir::Error) -> bool {
    let not_found = error
        .io_error()
        .is_some_and(|io| io.kind() == std::io::ErrorKind::NotFound);
    let is_link = error
        .path()
        .and_then(|path| path.symlink_metadata().ok())
        .is_some_and(|meta| meta.file_type().is_symlink());
    not_found && is_link
}

impl PathEnumerator for DirectoryEnumerator {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        if !self.root.is_dir() {
            return Err(EnumerationError::NotADirectory(self.root.clone()));
        }

        let mut skipped = 0usize;
        let mut dangling = 0usize;
        for entry in WalkDir::new(&self.root).follow_links(self.follow_links) {
            let entry = match entry {
                Ok(entry) => entry,
                // Nothing resolves through a link to nothing
                Err(e) if is_dangling_link(&e) => {
                    dangling += 1;
                    continue;
                }
                Err(e) => {
                    return Err(EnumerationError::Walk {
                        root: self.root.clone(),
                        message: e.to_string(),
                    })
                }
            };
            // A symlink entry only reports its target's type through the path
            let is_file = if entry.path_is_symlink() {
                entry.path().is_file()
            } else {
                entry.file_type().is_file()
            };
            if !is_file {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|e| EnumerationError::Other(e.to_string()))?;
            match to_classpath_path(relative) {
                Some(path) => sink(&path),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!(root = %self.root.display(), skipped, "skipped non-UTF-8 file names");
        }
        if dangling > 0 {
            debug!(root = %self.root.display(), dangling, "skipped dangling symbolic links");
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }
}
