/// Path utilities for base paths, group prefixes and request paths
///
/// All functions are **pure**: given same input, always produce same output with no side effects.
use std::borrow::Cow;

/// Removes a single trailing slash
///
/// ```
/// use signpost_router::path::strip_trailing_slash;
///
/// assert_eq!(strip_trailing_slash("/test/123/"), "/test/123");
/// assert_eq!(strip_trailing_slash("/test/123"), "/test/123");
/// assert_eq!(strip_trailing_slash("/"), "");
/// ```
pub fn strip_trailing_slash(uri: &str) -> &str {
    uri.strip_suffix('/').unwrap_or(uri)
}

/// Normalizes a base path to exactly one leading and one trailing slash
///
/// Returns `Cow::Borrowed` when the input is already in that form.
///
/// # Examples
///
/// ```
/// use signpost_router::path::normalize_base_path;
/// use std::borrow::Cow;
///
/// assert!(matches!(normalize_base_path("/blog/"), Cow::Borrowed("/blog/")));
/// assert_eq!(normalize_base_path("blog"), "/blog/");
/// assert_eq!(normalize_base_path("//blog//"), "/blog/");
/// assert_eq!(normalize_base_path(""), "/");
/// ```
pub fn normalize_base_path(path: &str) -> Cow<'_, str> {
    let trimmed = path.trim().trim_matches('/');

    if trimmed.is_empty() {
        return Cow::Borrowed("/");
    }

    // Fast path: already "/<trimmed>/"
    if path.len() == trimmed.len() + 2 && path.starts_with('/') && path.ends_with('/') {
        return Cow::Borrowed(path);
    }

    Cow::Owned(format!("/{}/", trimmed))
}

/// Joins a group prefix and a local URI with exactly one separator
///
/// Each side is slash-trimmed first; nothing else is normalized.
///
/// ```
/// use signpost_router::path::join_prefix;
///
/// assert_eq!(join_prefix("/prefix/", "/all"), "prefix/all");
/// assert_eq!(join_prefix("a/b", "c"), "a/b/c");
/// ```
pub fn join_prefix(prefix: &str, uri: &str) -> String {
    format!("{}/{}", prefix.trim_matches('/'), uri.trim_matches('/'))
}

/// Drops the query string from a request target
pub fn strip_query(path: &str) -> &str {
    path.split_once('?').map_or(path, |(path, _)| path)
}

/// Places a template body under a base path
///
/// `base` must end with `/`. With `trailing_slash` the result is the
/// canonical form; without it, the bare form.
pub(crate) fn with_base(base: &str, body: &str, trailing_slash: bool) -> String {
    match (body.is_empty(), trailing_slash) {
        (true, true) => base.to_string(),
        (true, false) => match base.trim_end_matches('/') {
            "" => "/".to_string(),
            trimmed => trimmed.to_string(),
        },
        (false, true) => format!("{}{}/", base, body),
        (false, false) => format!("{}{}", base, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_path_variants() {
        assert_eq!(normalize_base_path("/base-path/"), "/base-path/");
        assert_eq!(normalize_base_path("/base-path"), "/base-path/");
        assert_eq!(normalize_base_path("base-path/"), "/base-path/");
        assert_eq!(normalize_base_path("base-path"), "/base-path/");
        assert_eq!(normalize_base_path("/"), "/");
        assert_eq!(normalize_base_path("/a/b"), "/a/b/");
    }

    #[test]
    fn test_normalize_base_path_borrows_when_valid() {
        assert!(matches!(normalize_base_path("/"), Cow::Borrowed("/")));
        assert!(matches!(normalize_base_path("/app/"), Cow::Borrowed("/app/")));
        assert!(matches!(normalize_base_path("/app"), Cow::Owned(_)));
    }

    #[test]
    fn test_join_prefix_trims_both_sides() {
        assert_eq!(join_prefix("prefix", "all"), "prefix/all");
        assert_eq!(join_prefix("/prefix", "all"), "prefix/all");
        assert_eq!(join_prefix("prefix/", "/all/"), "prefix/all");
        assert_eq!(join_prefix("prefix", ""), "prefix/");
    }

    #[test]
    fn test_strip_query() {
        assert_eq!(strip_query("/posts?page=2"), "/posts");
        assert_eq!(strip_query("/posts"), "/posts");
        assert_eq!(strip_query("/?"), "/");
    }

    #[test]
    fn test_with_base() {
        assert_eq!(with_base("/", "posts/all", true), "/posts/all/");
        assert_eq!(with_base("/", "posts/all", false), "/posts/all");
        assert_eq!(with_base("/base/", "", true), "/base/");
        assert_eq!(with_base("/base/", "", false), "/base");
        assert_eq!(with_base("/", "", false), "/");
    }
}
