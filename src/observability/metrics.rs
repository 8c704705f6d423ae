//! Filter metrics.
//!
//! # Metrics
//! - `jsonp_requests_total` (counter): requests seen by the filter, labelled
//!   by `outcome`

use metrics::counter;

pub const REQUESTS_TOTAL: &str = "jsonp_requests_total";

/// What the filter did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not a JSONP request.
    Passthrough,
    /// JSONP request answered with 400.
    Rejected,
    /// JSONP request whose response was wrapped.
    Wrapped,
    /// JSONP request whose response was neither JSON nor JavaScript.
    Skipped,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Outcome::Passthrough => "passthrough",
            Outcome::Rejected => "rejected",
            Outcome::Wrapped => "wrapped",
            Outcome::Skipped => "skipped",
        }
    }
}

pub fn record_outcome(outcome: Outcome) {
    counter!(REQUESTS_TOTAL, "outcome" => outcome.as_str()).increment(1);
}
