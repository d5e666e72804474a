//! Guarded Finder
//!
//! Wraps a classpath-backed `ResourceFinder` and only lets it probe paths
//! the membership store says might exist. A definite miss returns `None`
//! without touching the delegate, which is the whole point: resource
//! resolution tries many locale and style variants, and most of them do
//! not exist.

use std::sync::Arc;

use tracing::debug;

use crate::domain::{normalize_prefix, qualify, MembershipStore};
use crate::ports::ResourceFinder;

/// Decorator that consults the membership store before delegating
///
/// Many guards share one frozen store; each owns exactly one delegate.
pub struct GuardedFinder<F> {
    /// The real finder, called only for possible hits
    delegate: F,
    /// Frozen store shared by every guard
    store: Arc<MembershipStore>,
    /// Delegate's prefix, empty or ending in `/`
    prefix: String,
}

impl<F: ResourceFinder> GuardedFinder<F> {
    /// Wrap `delegate`, qualifying store lookups with `prefix`
    ///
    /// `prefix` must be the prefix the delegate itself applies. A missing
    /// trailing separator is added.
    pub fn new(delegate: F, store: Arc<MembershipStore>, prefix: &str) -> Self {
        Self {
            delegate,
            store,
            prefix: normalize_prefix(prefix),
        }
    }

    /// Wrap `delegate` using the prefix it reports through `classpath_prefix`
    pub fn from_delegate(delegate: F, store: Arc<MembershipStore>) -> Self {
        let prefix = normalize_prefix(delegate.classpath_prefix().unwrap_or_default());
        Self {
            delegate,
            store,
            prefix,
        }
    }

    /// Normalized prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// The wrapped finder
    pub fn delegate(&self) -> &F {
        &self.delegate
    }

    /// The shared membership store
    pub fn store(&self) -> &Arc<MembershipStore> {
        &self.store
    }

    /// Unwrap, returning the delegate
    pub fn into_inner(self) -> F {
        self.delegate
    }

    /// Whether `path` (unqualified) might exist under this guard's prefix
    pub fn might_exist(&self, path: &str) -> bool {
        self.store.might_contain(&qualify(&self.prefix, path))
    }
}

impl<F: ResourceFinder> ResourceFinder for GuardedFinder<F> {
    type Scope = F::Scope;
    type Resource = F::Resource;

    fn find(&self, scope: &Self::Scope, path: &str) -> Option<Self::Resource> {
        let qualified = qualify(&self.prefix, path);
        if self.store.might_contain(&qualified) {
            debug!(path = %qualified, "path probably exists, delegating");
            // The delegate applies its own prefix, so it gets the bare path
            self.delegate.find(scope, path)
        } else {
            debug!(path = %qualified, "path does not exist");
            None
        }
    }
}
