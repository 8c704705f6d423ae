//! Callback name validation.
//!
//! The callback name is written verbatim into a JavaScript response, so it
//! is the injection boundary of the whole filter. Only `[A-Za-z0-9._]` is
//! accepted, over the entire string.

use std::fmt;

use crate::error::JsonpError;

/// A callback function name that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Callback(String);

impl Callback {
    /// Validate a raw `callback` parameter value.
    pub fn parse(raw: Option<&str>) -> Result<Self, JsonpError> {
        let raw = raw.ok_or(JsonpError::MissingCallback)?;
        if is_valid_callback(raw) {
            Ok(Self(raw.to_string()))
        } else {
            Err(JsonpError::InvalidCallback(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Returns true if `name` is non-empty and made only of letters, digits,
/// `.` and `_`.
pub fn is_valid_callback(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'.' || b == b'_')
}
