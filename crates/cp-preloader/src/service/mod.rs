//! Service Layer
//!
//! Orchestrates the build pass and decorates host finders with the
//! frozen membership store.

pub mod guarded_finder;
pub mod preloader;

pub use guarded_finder::GuardedFinder;
pub use preloader::{BuildReport, ClasspathPreloader};
