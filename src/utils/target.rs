//! Redirect target construction from a request path.

/// Splits a request path into the code and the extra path after it.
///
/// The extra path keeps its leading slash. A leading slash on `path` is
/// ignored.
///
/// # Examples
///
/// ```
/// use shortgate::utils::target::split_code_path;
///
/// assert_eq!(split_code_path("/-L/docs/x"), ("-L", "/docs/x"));
/// assert_eq!(split_code_path("/-L"), ("-L", ""));
/// ```
pub fn split_code_path(path: &str) -> (&str, &str) {
    let path = path.strip_prefix('/').unwrap_or(path);
    match path.find('/') {
        Some(idx) => path.split_at(idx),
        None => (path, ""),
    }
}

/// Appends the extra path and raw query string to a stored long URL.
///
/// The slash between a long URL ending in `/` and an extra path starting with
/// `/` is not doubled. An empty query adds nothing.
pub fn target_url(long_url: &str, rest: &str, query: Option<&str>) -> String {
    let mut target = String::with_capacity(long_url.len() + rest.len() + 1);
    target.push_str(long_url);

    if long_url.ends_with('/') {
        target.push_str(rest.strip_prefix('/').unwrap_or(rest));
    } else {
        target.push_str(rest);
    }

    if let Some(query) = query.filter(|q| !q.is_empty()) {
        target.push('?');
        target.push_str(query);
    }

    target
}
