//! JSONP trigger detection and request path normalization.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use axum::http::uri::{PathAndQuery, Uri};
use serde::{Deserialize, Serialize};
use thiserror::Error;

const JSONP_EXT: &str = ".jsonp";
const JSON_EXT: &str = ".json";

/// Selects which condition marks a request as a JSONP request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// The request path has a `.jsonp` extension.
    #[default]
    Extension,
    /// A `callback` parameter is present, whatever the path.
    Callback,
}

impl Trigger {
    /// Decide whether a request is a JSONP request.
    pub fn is_triggered(self, path: &str, has_callback: bool) -> bool {
        match self {
            Trigger::Extension => has_jsonp_extension(path),
            Trigger::Callback => has_callback,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown trigger {0:?}, expected \"extension\" or \"callback\"")]
pub struct ParseTriggerError(String);

impl FromStr for Trigger {
    type Err = ParseTriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "extension" => Ok(Trigger::Extension),
            "callback" => Ok(Trigger::Callback),
            _ => Err(ParseTriggerError(s.to_string())),
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::Extension => f.write_str("extension"),
            Trigger::Callback => f.write_str("callback"),
        }
    }
}

/// Returns true if the last path segment has a `.jsonp` extension, in any
/// case. A bare dotfile such as `/.jsonp` has no extension.
pub fn has_jsonp_extension(path: &str) -> bool {
    let segment = path.rsplit('/').next().unwrap_or_default();
    segment.len() > JSONP_EXT.len() && ends_with_jsonp(segment)
}

/// Replace a trailing `.jsonp` (any case) with `.json`.
pub fn rewrite_path(path: &str) -> Cow<'_, str> {
    if ends_with_jsonp(path) {
        let stem = &path[..path.len() - JSONP_EXT.len()];
        Cow::Owned(format!("{stem}{JSON_EXT}"))
    } else {
        Cow::Borrowed(path)
    }
}

/// Apply [`rewrite_path`] to a URI, keeping scheme, authority and query.
pub fn rewrite_uri(uri: &Uri) -> Uri {
    let path = match rewrite_path(uri.path()) {
        Cow::Borrowed(_) => return uri.clone(),
        Cow::Owned(path) => path,
    };

    let path_and_query = match uri.query() {
        Some(query) => format!("{path}?{query}"),
        None => path,
    };

    let mut parts = uri.clone().into_parts();
    match path_and_query.parse::<PathAndQuery>() {
        Ok(pq) => parts.path_and_query = Some(pq),
        Err(_) => return uri.clone(),
    }
    Uri::from_parts(parts).unwrap_or_else(|_| uri.clone())
}

fn ends_with_jsonp(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= JSONP_EXT.len()
        && bytes[bytes.len() - JSONP_EXT.len()..].eq_ignore_ascii_case(JSONP_EXT.as_bytes())
}
