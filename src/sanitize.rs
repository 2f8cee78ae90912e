//! Filesystem-safe names derived from source file names

use std::path::Path;

/// Maximum number of characters kept from the source file stem
pub const MAX_NAME_CHARS: usize = 25;

/// Name used when nothing usable is left after sanitizing
pub const FALLBACK_NAME: &str = "document";

fn is_forbidden(c: char) -> bool {
    matches!(c, '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*') || (c as u32) < 0x20
}

/// Sanitize a raw name: truncate, replace forbidden characters with `_`, trim
///
/// The result is always a single non-empty path segment; names that end up
/// empty, `.` or `..` become [`FALLBACK_NAME`].
pub fn sanitize_name(raw: &str) -> String {
    let replaced: String = raw
        .chars()
        .take(MAX_NAME_CHARS)
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim();
    match trimmed {
        "" | "." | ".." => FALLBACK_NAME.to_string(),
        _ => trimmed.to_string(),
    }
}

/// Sanitized name for a source document, taken from its file stem
pub fn sanitize_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    sanitize_name(&stem)
}
