//! Flattened `callback` parameter lookup over query string and form body.
//!
//! Form parameters override query parameters. When a key repeats, the last
//! occurrence wins.

use axum::http::{header, HeaderMap};
use url::form_urlencoded;

/// Name of the request parameter carrying the callback.
pub const CALLBACK_PARAM: &str = "callback";

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Read `callback` from a raw (still percent-encoded) query string.
pub fn callback_from_query(query: Option<&str>) -> Option<String> {
    query.and_then(|q| last_callback(q.as_bytes()))
}

/// Read `callback` from an `application/x-www-form-urlencoded` body.
pub fn callback_from_form(body: &[u8]) -> Option<String> {
    last_callback(body)
}

/// Merge the two sources, form taking precedence.
pub fn merge(query: Option<String>, form: Option<String>) -> Option<String> {
    form.or(query)
}

/// Returns true if the request body is URL-encoded form data.
pub fn is_form(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|ct| {
            let media = ct.split(';').next().unwrap_or_default().trim();
            media.eq_ignore_ascii_case(FORM_CONTENT_TYPE)
        })
        .unwrap_or(false)
}

/// A bare `callback` without `=` carries no value and counts as absent,
/// also when it is the last occurrence.
fn last_callback(input: &[u8]) -> Option<String> {
    let mut found = None;
    for pair in input.split(|&b| b == b'&') {
        let has_value = pair.contains(&b'=');
        let Some((key, value)) = form_urlencoded::parse(pair).next() else {
            continue;
        };
        if key == CALLBACK_PARAM {
            found = has_value.then(|| value.into_owned());
        }
    }
    found
}
