//! HTTP serving for the demo gateway.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → JsonpService (outermost, so the .jsonp → .json rewrite happens
//!       before route matching)
//!     → axum Router (trace, timeout, demo handlers)
//!     → JsonpService wraps the JSON response
//!     → Send to client
//! ```

pub mod server;

pub use server::{build_app, HttpServer};
