//! Type-name pattern matching.
//!
//! Patterns are matched against fully resolved type strings such as
//! `*github.com/rs/zerolog.Logger`. A pattern matches when it is a suffix of
//! the type string that starts on a path (`/`) or member (`.`) boundary, so
//! `zerolog.Logger` matches `github.com/rs/zerolog.Logger` but `Logger` does
//! not match `MyLogger`.
//!
//! A leading `*` in the pattern requires the type to be a pointer. A pointer
//! type never matches a pattern without `*`.

const POINTER: char = '*';

/// Returns true if `type_name` matches `pattern`.
#[must_use]
pub fn matches(type_name: &str, pattern: &str) -> bool {
    let (type_name, pattern) = match (
        type_name.strip_prefix(POINTER),
        pattern.strip_prefix(POINTER),
    ) {
        (Some(ty), Some(pat)) => (ty, pat),
        (None, None) => (type_name, pattern),
        _ => return false,
    };

    if pattern.is_empty() {
        return false;
    }

    match type_name.strip_suffix(pattern) {
        Some(prefix) => prefix.is_empty() || prefix.ends_with(['/', '.']),
        None => false,
    }
}

/// Returns the first pattern in `patterns` that `type_name` matches.
#[must_use]
pub fn matches_any<'p, S: AsRef<str>>(type_name: &str, patterns: &'p [S]) -> Option<&'p str> {
    patterns
        .iter()
        .map(AsRef::as_ref)
        .find(|pattern| matches(type_name, pattern))
}
