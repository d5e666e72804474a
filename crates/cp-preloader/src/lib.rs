//! # Classpath Preloader
//!
//! Prunes resource lookups for paths that cannot exist on the classpath.
//!
//! Resource resolution with locale and style fallbacks probes many paths
//! per request, and most of them are misses. Where each probe is slow
//! (cold filesystems, large archive indexes) the first request for a new
//! locale stalls. This crate scans the classpath once at startup into a
//! fixed-size Bloom filter and puts a guard in front of each
//! classpath-backed finder, so definite misses never reach the finder.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure logic, no I/O
//!   - `MembershipStore`: Bloom filter of known paths
//!   - `PreloaderConfig`: capacity and false positive rate
//!   - `PreloaderConfigBuilder`: Fluent builder for configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `ResourceFinder`: Driving port (the lookup being guarded)
//!   - `PathEnumerator`: Driven port (classpath listing)
//!
//! - **Service Layer** (`service/`): Orchestration
//!   - `ClasspathPreloader`: build pass, freeze, finder list rewrite
//!   - `GuardedFinder`: the decorator
//!
//! - **Adapters Layer** (`adapters/`): Filesystem connections
//!   - `DirectoryEnumerator`, `ArchiveEnumerator`, `ClasspathEnumerator`
//!   - `FsResourceFinder`, `ArchiveResourceFinder`
//!
//! ## Invariants
//!
//! - **No false negatives**: every enumerated path passes the guard
//! - **Constant memory**: filter size depends on configuration only
//! - **Frozen snapshot**: the store is immutable once shared
//!
//! ## Usage Example
//!
//! ```ignore
//! use cp_preloader::{ClasspathEnumerator, ClasspathPreloader, FsResourceFinder, PreloaderConfig};
//!
//! let classpath = ClasspathEnumerator::new(["target/classes", "target/resources"]);
//! let preloader = ClasspathPreloader::build(&PreloaderConfig::default(), &classpath)?;
//!
//! let finder = preloader.guard(FsResourceFinder::new("target/classes"));
//! // "Page_de.html" is pruned without touching the disk
//! let page = finder.find(&(), "app/Page_de.html");
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use adapters::{
    ArchiveEnumerator, ArchiveResourceFinder, ClasspathElement, ClasspathEnumerator,
    DirectoryEnumerator, FsResource, FsResourceFinder,
};
pub use domain::{MembershipStore, PreloaderConfig, PreloaderConfigBuilder};
pub use error::{EnumerationError, PreloadError};
pub use ports::{PathEnumerator, ResourceFinder};
pub use service::{BuildReport, ClasspathPreloader, GuardedFinder};
