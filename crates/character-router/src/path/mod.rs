/// Path validation and normalization
///
/// All functions are **pure**: given same input, always produce same output with no side effects.

use std::borrow::Cow;

/// Validates if a path is in canonical form
///
/// # Rules
///
/// - Must start with `/`
/// - Must not contain `//` or `\`
/// - Must not end with `/` (except root `/`)
///
/// # Examples
///
/// ```
/// use character_router::path::is_valid_path;
///
/// assert!(is_valid_path("/"));
/// assert!(is_valid_path("/characters/42"));
///
/// assert!(!is_valid_path(""));
/// assert!(!is_valid_path("characters"));
/// assert!(!is_valid_path("/characters/"));
/// assert!(!is_valid_path("/characters//42"));
/// ```
pub fn is_valid_path(path: &str) -> bool {
    if !path.starts_with('/') || path.contains("//") || path.contains('\\') {
        return false;
    }
    path == "/" || !path.ends_with('/')
}

/// Normalize a path to canonical form
///
/// Returns `Cow::Borrowed` when the input is already canonical, so the
/// common case of a well-formed browser path costs no allocation.
///
/// - Trailing slashes: `/characters/` → `/characters`
/// - Repeated slashes: `/characters//42` → `/characters/42`
/// - Backslashes: `\characters\42` → `/characters/42`
/// - Empty input: `""` → `/`
///
/// # Examples
///
/// ```
/// use character_router::path::normalize_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_path("/characters"), Cow::Borrowed("/characters")));
/// assert_eq!(normalize_path("characters/42/"), "/characters/42");
/// ```
pub fn normalize_path(path: &str) -> Cow<'_, str> {
    if is_valid_path(path) {
        return Cow::Borrowed(path);
    }

    let segments: Vec<&str> = path
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty())
        .collect();

    Cow::Owned(format!("/{}", segments.join("/")))
}

/// Joins a base prefix and a path, keeping the result canonical
///
/// ```
/// use character_router::path::join_base;
///
/// assert_eq!(join_base("/", "/characters"), "/characters");
/// assert_eq!(join_base("/app/", "/characters"), "/app/characters");
/// assert_eq!(join_base("/app", "/"), "/app");
/// ```
pub fn join_base(base: &str, path: &str) -> String {
    let base = normalize_path(base);
    let path = normalize_path(path);
    match (base.as_ref(), path.as_ref()) {
        ("/", path) => path.to_string(),
        (base, "/") => base.to_string(),
        (base, path) => format!("{base}{path}"),
    }
}

/// Strips a base prefix from a path on a segment boundary
///
/// Returns `None` when the path lies outside the base.
///
/// ```
/// use character_router::path::strip_base;
///
/// assert_eq!(strip_base("/app", "/app/characters").as_deref(), Some("/characters"));
/// assert_eq!(strip_base("/app", "/app").as_deref(), Some("/"));
/// assert_eq!(strip_base("/app", "/application"), None);
/// ```
pub fn strip_base(base: &str, path: &str) -> Option<String> {
    let base = normalize_path(base);
    let path = normalize_path(path);

    if base == "/" {
        return Some(path.into_owned());
    }

    match path.strip_prefix(base.as_ref()) {
        Some("") => Some("/".to_string()),
        Some(rest) if rest.starts_with('/') => Some(rest.to_string()),
        _ => None,
    }
}

/// Percent-decodes one path segment
///
/// Decoding happens per segment, so an encoded `%2F` never splits a
/// segment in two. Input that does not decode to UTF-8 is kept as written.
///
/// ```
/// use character_router::path::decode_segment;
///
/// assert_eq!(decode_segment("Rick%20Sanchez"), "Rick Sanchez");
/// assert_eq!(decode_segment("a%2Fb"), "a/b");
/// assert_eq!(decode_segment("%FF"), "%FF");
/// assert_eq!(decode_segment("a+b"), "a+b");
/// ```
pub fn decode_segment(segment: &str) -> Cow<'_, str> {
    urlencoding::decode(segment).unwrap_or(Cow::Borrowed(segment))
}
