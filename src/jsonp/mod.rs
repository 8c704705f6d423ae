//! JSONP response filter.
//!
//! # Data Flow
//! ```text
//! Request
//!     → params.rs (callback from query / form body)
//!     → trigger.rs (extension or callback trigger, .jsonp → .json)
//!     → callback.rs (name validation, 400 on failure)
//!     → inner service
//!     → content_type.rs (JSON / JavaScript only)
//!     → wrap.rs ([/**/]callback(json);)
//!     → Response
//! ```
//!
//! # Design Decisions
//! - Configuration is captured once by [`JsonpLayer`]; no per-request or
//!   shared mutable state
//! - The body is treated as opaque bytes, never parsed as JSON
//! - Inner service errors propagate untouched

pub mod callback;
pub mod content_type;
pub mod layer;
pub mod params;
pub mod trigger;
pub mod wrap;

pub use callback::{is_valid_callback, Callback};
pub use layer::{JsonpLayer, JsonpRequest, JsonpService};
pub use trigger::Trigger;
