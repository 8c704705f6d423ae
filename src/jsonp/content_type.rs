//! Response content-type negotiation.

use axum::http::HeaderValue;

/// Media type of every wrapped response.
pub const JAVASCRIPT_MIME: &str = "application/javascript";

const WRAPPABLE: [&str; 2] = ["application/json", "text/javascript"];

/// Returns true if the response content type is JSON or JavaScript.
pub fn is_wrappable(content_type: &HeaderValue) -> bool {
    let media = media_type(content_type.as_bytes());
    WRAPPABLE.iter().any(|prefix| {
        media.len() >= prefix.len() && media[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}

/// Swap the media type for `application/javascript`, keeping the `;` and
/// any parameters untouched.
pub fn to_javascript(content_type: &HeaderValue) -> HeaderValue {
    let value = content_type.as_bytes();
    let params = &value[media_type(value).len()..];
    if params.is_empty() {
        return HeaderValue::from_static(JAVASCRIPT_MIME);
    }

    let mut out = Vec::with_capacity(JAVASCRIPT_MIME.len() + params.len());
    out.extend_from_slice(JAVASCRIPT_MIME.as_bytes());
    out.extend_from_slice(params);
    HeaderValue::from_bytes(&out).unwrap_or_else(|_| HeaderValue::from_static(JAVASCRIPT_MIME))
}

fn media_type(value: &[u8]) -> &[u8] {
    match value.iter().position(|&b| b == b';') {
        Some(idx) => &value[..idx],
        None => value,
    }
}
