//! Error types for the JSONP filter.
//!
//! None of these ever reach the client as a message: every variant maps to
//! the bare `400 Bad Request` rejection (no headers, no body). They exist so
//! the rejection reason can be logged and tested.

use thiserror::Error;

/// Reasons a JSONP-triggered request is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JsonpError {
    #[error("callback parameter is missing")]
    MissingCallback,

    #[error("callback {0:?} contains characters outside [A-Za-z0-9._]")]
    InvalidCallback(String),

    #[error("form body could not be read: {0}")]
    FormBody(String),
}

impl JsonpError {
    /// Short label used for log fields and metric labels.
    pub fn reason(&self) -> &'static str {
        match self {
            JsonpError::MissingCallback => "missing_callback",
            JsonpError::InvalidCallback(_) => "invalid_callback",
            JsonpError::FormBody(_) => "form_body",
        }
    }
}
