//! Filename rules for uploads, converted artifacts and downloads.

/// Reduces a client-supplied filename to a safe single path component.
///
/// Non-ASCII characters are dropped, path separators and whitespace runs
/// become a single `_`, anything outside `[A-Za-z0-9_.-]` is removed and
/// leading/trailing `.` and `_` are stripped. The result may be empty.
pub fn sanitize_filename(raw: &str) -> String {
    let ascii: String = raw
        .chars()
        .filter(char::is_ascii)
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = ascii.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_string()
}

/// Name of the converted artifact: `{basename}_converted.{target}`, where
/// the basename is everything before the last dot.
pub fn converted_filename(filename: &str, target_extension: &str) -> String {
    let base = filename
        .rsplit_once('.')
        .map(|(base, _)| base)
        .unwrap_or(filename);
    format!("{}_converted.{}", base, target_extension)
}

/// Whether `name` is safe to look up in the converted directory.
///
/// Only names that survive [`sanitize_filename`] unchanged qualify, which
/// rules out separators, `..` components and hidden files.
pub fn is_safe_download_name(name: &str) -> bool {
    !name.is_empty() && sanitize_filename(name) == name
}
