//! # Identity & Text Helpers
//!
//! Small, total string conversions used when deriving identities from URL-shaped ids.
//! None of these functions fail: malformed input maps to a sentinel (`0`, `""`).

/// Parses an integer loosely, returning `0` for empty or non-numeric input.
///
/// Surrounding whitespace and a leading sign are accepted. Anything else that does
/// not parse as an `i32` (including overflow) yields `0`, so a malformed id reads
/// as id `0` rather than failing.
///
/// ```
/// use hydra_framework::text::to_int;
///
/// assert_eq!(to_int("42"), 42);
/// assert_eq!(to_int(" -7 "), -7);
/// assert_eq!(to_int("abc"), 0);
/// assert_eq!(to_int(""), 0);
/// ```
pub fn to_int(s: &str) -> i32 {
    s.trim().parse().unwrap_or(0)
}

/// Removes every occurrence of `prefix` and parses the remainder with [`to_int`].
pub fn to_int_id(s: &str, prefix: &str) -> i32 {
    if prefix.is_empty() {
        return to_int(s);
    }
    to_int(&s.replace(prefix, ""))
}

/// Converts a full URL path (possibly with a query string) into a DOM-safe token.
///
/// The leading `/` characters are trimmed and each `/`, `?`, `=` or `|` becomes `-`.
/// Use [`Resource::html_id`](crate::Resource::html_id) for plain hierarchical ids.
pub fn to_html_id(s: &str) -> String {
    s.trim_start_matches('/')
        .chars()
        .map(|c| match c {
            '/' | '?' | '=' | '|' => '-',
            other => other,
        })
        .collect()
}

/// Returns everything before the last `?`, or the input unchanged when there is none.
pub fn remove_query_string(s: &str) -> &str {
    match s.rfind('?') {
        Some(idx) => &s[..idx],
        None => s,
    }
}

/// Appends `key=value` to a URL, choosing `?` or `&` as appropriate.
///
/// An empty URL stays empty.
pub fn append_to_query_string(s: &str, key: &str, value: &str) -> String {
    if s.is_empty() {
        return String::new();
    }
    let separator = if s.contains('?') { '&' } else { '?' };
    format!("{s}{separator}{key}={value}")
}

/// True when the string has any content once spaces are removed.
pub fn has_text(s: &str) -> bool {
    s.chars().any(|c| c != ' ')
}

/// Returns `placeholder` for an empty string.
pub fn with_placeholder_if_empty<'a>(s: &'a str, placeholder: &'a str) -> &'a str {
    if s.is_empty() {
        placeholder
    } else {
        s
    }
}
