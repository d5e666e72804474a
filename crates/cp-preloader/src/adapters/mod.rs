//! Adapters Layer
//!
//! Filesystem implementations of the ports:
//! - `DirectoryEnumerator`: walk an exploded classpath directory
//! - `ArchiveEnumerator` / `ArchiveResourceFinder`: jar and zip roots
//! - `ClasspathEnumerator`: every root of a classpath, in order
//! - `FsResourceFinder`: resolve resources below a classpath directory

pub mod archive;
pub mod classpath;
pub mod directory;
pub mod fs_finder;

pub use archive::{is_archive, ArchiveEnumerator, ArchiveResourceFinder};
pub use classpath::{ClasspathElement, ClasspathEnumerator};
pub use directory::{to_classpath_path, DirectoryEnumerator};
pub use fs_finder::{is_contained, FsResource, FsResourceFinder};
