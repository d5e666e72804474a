//! Inbound Ports (Driving Ports)
//!
//! `ResourceFinder` is the lookup capability the host application calls to
//! resolve a resource path. Real finders implement it, and so does the
//! `GuardedFinder` decorator, which makes the guard a drop-in replacement.

use std::sync::Arc;

/// Resolve a path to a resource, at whatever cost the backing store has
///
/// Both associated types are opaque to the preloader: `Scope` is the
/// context a lookup is relative to (a type, module, or loader handle) and
/// `Resource` is whatever the finder hands back.
pub trait ResourceFinder: Send + Sync {
    /// Context passed through to the lookup untouched
    type Scope: ?Sized;
    /// Handle for a found resource
    type Resource;

    /// Look up `path`, returning `None` when it does not exist
    fn find(&self, scope: &Self::Scope, path: &str) -> Option<Self::Resource>;

    /// Prefix this finder applies to every path, for classpath-backed finders
    ///
    /// Finders that return `Some` resolve against the scanned classpath and
    /// are wrapped by `ClasspathPreloader::configure`. Everything else
    /// (custom, in-memory, or remote finders) keeps the default `None` and
    /// is left alone.
    fn classpath_prefix(&self) -> Option<&str> {
        None
    }
}

impl<F: ResourceFinder + ?Sized> ResourceFinder for Box<F> {
    type Scope = F::Scope;
    type Resource = F::Resource;

    fn find(&self, scope: &Self::Scope, path: &str) -> Option<Self::Resource> {
        (**self).find(scope, path)
    }

    fn classpath_prefix(&self) -> Option<&str> {
        (**self).classpath_prefix()
    }
}

impl<F: ResourceFinder + ?Sized> ResourceFinder for Arc<F> {
    type Scope = F::Scope;
    type Resource = F::Resource;

    fn find(&self, scope: &Self::Scope, path: &str) -> Option<Self::Resource> {
        (**self).find(scope, path)
    }

    fn classpath_prefix(&self) -> Option<&str> {
        (**self).classpath_prefix()
    }
}
