//! Error types for the classpath preloader

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while building or configuring the preloader
#[derive(Debug, Error)]
pub enum PreloadError {
    #[error("Invalid capacity: expected item count must be greater than 0")]
    InvalidCapacity,

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Cannot merge stores with different parameters: m={left_bits}/k={left_hashes} vs m={right_bits}/k={right_hashes}")]
    ParameterMismatch {
        left_bits: usize,
        left_hashes: usize,
        right_bits: usize,
        right_hashes: usize,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Classpath enumeration failed: {0}")]
    Enumeration(#[from] EnumerationError),
}

/// Errors raised by path enumerators
///
/// Any of these aborts the build: a partially scanned classpath would
/// report existing paths as absent.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("Classpath root is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Failed to walk {root}: {message}")]
    Walk { root: PathBuf, message: String },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read archive {path}: {source}")]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    #[error("Enumeration error: {0}")]
    Other(String),
}
