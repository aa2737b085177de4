//! Media type comparison for `Content-Type` and `Accept` values.

/// The media type essence: parameters stripped, trimmed, lowercased.
///
/// `"application/json; charset=utf-8"` becomes `"application/json"`.
pub fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or(content_type)
        .trim()
        .to_ascii_lowercase()
}

/// Whether `pattern` (possibly `*/*` or `type/*`) covers `media_type`.
pub fn matches(pattern: &str, media_type: &str) -> bool {
    let pattern = essence(pattern);
    let media_type = essence(media_type);

    if pattern == media_type || pattern == "*/*" {
        return true;
    }
    match pattern.strip_suffix("/*") {
        Some(main_type) => media_type
            .split_once('/')
            .is_some_and(|(candidate, _)| candidate == main_type),
        None => false,
    }
}

/// Split an `Accept` value into media type essences.
pub fn parse_accept(accept: &str) -> Vec<String> {
    accept
        .split(',')
        .map(essence)
        .filter(|media_type| !media_type.is_empty())
        .collect()
}
