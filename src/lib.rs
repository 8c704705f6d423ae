//! JSONP response filter for axum/tower services.
//!
//! [`JsonpLayer`] turns `application/json` (and `text/javascript`) responses
//! into JSONP responses when the client asks for them, either through a
//! `.jsonp` path extension or, optionally, just by sending `callback`.
//!
//! ```no_run
//! use axum::{routing::get, Json, Router, ServiceExt};
//! use jsonp_gateway::{JsonpConfig, JsonpLayer};
//! use tower::Layer;
//!
//! # async fn run() -> std::io::Result<()> {
//! let router = Router::new().route("/data.json", get(|| async { Json([1, 2, 3]) }));
//! // Outside the router, so `/data.jsonp` is rewritten before routing.
//! let app = JsonpLayer::new(JsonpConfig::default()).layer(router);
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//! axum::serve(listener, ServiceExt::<axum::extract::Request>::into_make_service(app)).await
//! # }
//! ```

pub mod config;
pub mod error;
pub mod http;
pub mod jsonp;
pub mod observability;

pub use config::{GatewayConfig, JsonpConfig};
pub use error::JsonpError;
pub use http::HttpServer;
pub use jsonp::{Callback, JsonpLayer, JsonpRequest, JsonpService, Trigger};
