pub use url::Url;

/// Check whether a reference is root-relative: a single leading slash,
/// not a protocol-relative double slash
pub fn is_root_relative(url: &str) -> bool {
    url.starts_with('/') && !url.starts_with("//")
}

/// Path of a parsed URL with its query string and fragment appended,
/// scheme and host stripped
pub fn path_with_query_and_fragment(url: &Url) -> String {
    let mut result: String = url.path().to_string();

    if let Some(query) = url.query() {
        result.push('?');
        result.push_str(query);
    }

    if let Some(fragment) = url.fragment() {
        result.push('#');
        result.push_str(fragment);
    }

    result
}
