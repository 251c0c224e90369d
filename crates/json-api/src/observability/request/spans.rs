//! Low-cardinality route labels for spans and metrics.

use uuid::Uuid;

const ID_PLACEHOLDER: &str = "{id}";

/// `path` with every resource identifier replaced by `{id}`, so
/// `/api/orders/<uuid>/cancel` and friends share one label.
pub(super) fn route_label(path: &str) -> String {
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| {
            if is_identifier(segment) {
                ID_PLACEHOLDER
            } else {
                segment
            }
        })
        .collect();

    format!("/{}", segments.join("/"))
}

fn is_identifier(segment: &str) -> bool {
    Uuid::parse_str(segment).is_ok() || segment.bytes().all(|b| b.is_ascii_digit())
}
