//! Classpath Enumerator
//!
//! A classpath is an ordered list of roots, each an exploded directory or
//! an archive. Every root becomes one element, and elements can be scanned
//! one after another or handed to `ClasspathPreloader::build_parallel`.

use std::path::PathBuf;

use super::archive::{is_archive, ArchiveEnumerator};
use super::directory::DirectoryEnumerator;
use crate::error::EnumerationError;
use crate::ports::PathEnumerator;

/// One classpath root
#[derive(Clone, Debug)]
pub enum ClasspathElement {
    Directory(DirectoryEnumerator),
    Archive(ArchiveEnumerator),
}

impl ClasspathElement {
    /// Pick the enumerator for `root`
    ///
    /// Regular files are read as archives. Anything else is walked as a
    /// directory, so a missing root fails the scan with `NotADirectory`.
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        if is_archive(&root) {
            Self::Archive(ArchiveEnumerator::new(root))
        } else {
            Self::Directory(DirectoryEnumerator::new(root))
        }
    }
}

impl PathEnumerator for ClasspathElement {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        match self {
            Self::Directory(directory) => directory.enumerate(sink),
            Self::Archive(archive) => archive.enumerate(sink),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Directory(directory) => directory.describe(),
            Self::Archive(archive) => archive.describe(),
        }
    }
}

/// A whole classpath: several roots scanned in order
#[derive(Clone, Debug, Default)]
pub struct ClasspathEnumerator {
    elements: Vec<ClasspathElement>,
}

impl ClasspathEnumerator {
    /// Classpath made of the given roots, in order
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            elements: roots.into_iter().map(ClasspathElement::for_root).collect(),
        }
    }

    /// Set symlink following on every directory element
    pub fn follow_links(mut self, follow: bool) -> Self {
        for element in &mut self.elements {
            if let ClasspathElement::Directory(directory) = element {
                *directory = directory.clone().follow_links(follow);
            }
        }
        self
    }

    /// Per-root enumerators, for `ClasspathPreloader::build_parallel`
    pub fn elements(&self) -> &[ClasspathElement] {
        &self.elements
    }
}

impl PathEnumerator for ClasspathEnumerator {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        for element in &self.elements {
            element.enumerate(sink)?;
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.elements
            .iter()
            .map(PathEnumerator::describe)
            .collect::<Vec<_>>()
            .join(":")
    }
}
