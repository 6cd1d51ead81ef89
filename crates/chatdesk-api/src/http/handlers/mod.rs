//! HTTP request handlers for the REST API.

pub mod auth;
pub mod conversation;

use axum::body::Bytes;
use serde::de::DeserializeOwned;

/// Parse an optional JSON body; an empty body yields the default.
///
/// Bodies are read as raw bytes rather than through `Json`, so a missing
/// content type or a malformed body never produces axum's plain-text
/// rejection and callers can map the failure into the error body.
pub(crate) fn parse_body<T: DeserializeOwned + Default>(
    body: &Bytes,
) -> Result<T, serde_json::Error> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body)
}
