//! Low-cardinality span names for HTTP requests.

use uuid::Uuid;

/// `"{method} {path}"` with every UUID path segment replaced by `{uuid}`.
pub(super) fn request_span_name(method: &str, path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{uuid}"
            } else {
                segment
            }
        })
        .collect();

    format!("{method} /{}", segments.join("/"))
}
