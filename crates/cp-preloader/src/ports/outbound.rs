//! Outbound Ports (Driven Ports)
//!
//! The preloader depends on something that can list every path on the
//! classpath once. Directory walking lives in `adapters`; hosts with other
//! sources (archive indexes, build manifests) implement this trait.

use crate::error::EnumerationError;

/// Source of every path reachable in one classpath element
///
/// Order is irrelevant and duplicates are harmless. An `Err` means the
/// listing is incomplete and must not be used.
pub trait PathEnumerator {
    /// Feed every path to `sink`
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError>;

    /// Short label for logs
    fn describe(&self) -> String {
        "in-memory paths".to_string()
    }
}

impl<S: AsRef<str>> PathEnumerator for [S] {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        for path in self {
            sink(path.as_ref());
        }
        Ok(())
    }
}

impl<S: AsRef<str>> PathEnumerator for Vec<S> {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        PathEnumerator::enumerate(self.as_slice(), sink)
    }
}

impl<E: PathEnumerator + ?Sized> PathEnumerator for &E {
    fn enumerate(&self, sink: &mut dyn FnMut(&str)) -> Result<(), EnumerationError> {
        (**self).enumerate(sink)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
