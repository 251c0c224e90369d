//! Request correlation IDs.

use salvo::{http::header::HeaderValue, prelude::Response};
use uuid::Uuid;

pub(super) const REQUEST_ID_HEADER: &str = "x-request-id";

/// Client IDs longer than this are replaced rather than logged.
const MAX_CLIENT_ID_LEN: usize = 128;

/// Reuse the caller's ID when it is short printable ASCII; mint a v7 UUID
/// otherwise.
pub(super) fn resolve(client_id: Option<String>) -> String {
    client_id
        .map(|id| id.trim().to_owned())
        .filter(|id| is_acceptable(id))
        .unwrap_or_else(|| Uuid::now_v7().to_string())
}

pub(super) fn echo(res: &mut Response, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        res.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}

fn is_acceptable(id: &str) -> bool {
    !id.is_empty() && id.len() <= MAX_CLIENT_ID_LEN && id.bytes().all(|b| b.is_ascii_graphic())
}
