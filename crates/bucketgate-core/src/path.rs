//! Directory and object key composition.
//!
//! Object storage has no directories; a "directory" is a key prefix ending in
//! [`SEPARATOR`], and its existence is recorded by an empty marker object
//! named [`DIRECTORY_MARKER`] under that prefix.

/// Key path separator.
pub const SEPARATOR: char = '/';

/// Name of the empty object that marks a directory.
pub const DIRECTORY_MARKER: &str = "_placeholder";

/// Ensure a directory path ends with exactly one separator.
///
/// Empty input stays empty (the container root). Repeated trailing
/// separators collapse into one.
///
/// # Examples
///
/// ```
/// use bucketgate_core::path::normalize_directory;
///
/// assert_eq!(normalize_directory("photos"), "photos/");
/// assert_eq!(normalize_directory("photos/"), "photos/");
/// assert_eq!(normalize_directory(""), "");
/// ```
#[must_use]
pub fn normalize_directory(directory: &str) -> String {
    if directory.is_empty() {
        return String::new();
    }
    let trimmed = directory.trim_end_matches(SEPARATOR);
    let mut normalized = String::with_capacity(trimmed.len() + 1);
    normalized.push_str(trimmed);
    normalized.push(SEPARATOR);
    normalized
}

/// Compose the key of an uploaded file.
///
/// `directory` must already be normalized. Leading separators of the file
/// name are dropped when a directory is present so the join never doubles
/// the separator.
#[must_use]
pub fn object_key(directory: &str, file_name: &str) -> String {
    if directory.is_empty() {
        return file_name.to_owned();
    }
    format!("{directory}{}", file_name.trim_start_matches(SEPARATOR))
}

/// Compose the key of a directory marker object.
///
/// `directory` must already be normalized.
#[must_use]
pub fn marker_key(directory: &str) -> String {
    format!("{directory}{DIRECTORY_MARKER}")
}
