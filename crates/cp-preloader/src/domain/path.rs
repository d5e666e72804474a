//! Classpath path helpers
//!
//! Paths are `/`-separated and relative to a classpath root, the same
//! form for directory entries and archive entries.

/// Namespace separator used in classpath paths
pub const SEPARATOR: char = '/';

/// Normalize a finder prefix so it can be concatenated with a path
///
/// Empty stays empty; anything else ends with exactly the separator it
/// already had, or gets one appended.
pub fn normalize_prefix(prefix: &str) -> String {
    if prefix.is_empty() || prefix.ends_with(SEPARATOR) {
        prefix.to_string()
    } else {
        let mut normalized = String::with_capacity(prefix.len() + 1);
        normalized.push_str(prefix);
        normalized.push(SEPARATOR);
        normalized
    }
}

/// Combine a normalized prefix with a path
pub fn qualify(prefix: &str, path: &str) -> String {
    let mut qualified = String::with_capacity(prefix.len() + path.len());
    qualified.push_str(prefix);
    qualified.push_str(path);
    qualified
}
