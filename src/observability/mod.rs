//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! JsonpService decisions
//!     → tracing events (structured fields: path, reason, status)
//!     → metrics.rs (jsonp_requests_total{outcome})
//!
//! Consumers:
//!     → logging.rs subscriber (stdout)
//!     → any metrics recorder the host application installs
//! ```
//!
//! # Design Decisions
//! - The filter only emits events; installing subscribers and recorders is
//!   left to the binary embedding it
//! - Without a recorder the metrics facade is a no-op

pub mod logging;
pub mod metrics;
