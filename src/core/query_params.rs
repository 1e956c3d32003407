/// Append URL-encoded query parameters to a path.
///
/// Keys are written as given; values are percent-encoded. An empty
/// parameter list leaves the path untouched.
///
/// # Example
/// ```
/// use feedline::core::query_params::with_query;
///
/// let url = with_query("/posts/3/comments", &[("user_id", "1".to_string())]);
/// assert_eq!(url, "/posts/3/comments?user_id=1");
/// ```
pub fn with_query(path: &str, params: &[(&str, String)]) -> String {
    if params.is_empty() {
        return path.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if path.contains('?') { '&' } else { '?' };
    format!("{}{}{}", path, separator, query)
}

/// Acting-user parameter carried by every mutating call
pub fn acting_user(user_id: i64) -> [(&'static str, String); 1] {
    [("user_id", user_id.to_string())]
}

/// Viewer parameter that lets the server annotate `is_liked`
pub fn viewer(current_user_id: i64) -> [(&'static str, String); 1] {
    [("current_user_id", current_user_id.to_string())]
}

/// Drop any query string or fragment from a location.
pub fn strip_query(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}
