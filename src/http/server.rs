//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo JSON endpoints
//! - Wire up middleware (tracing, timeout)
//! - Put the JSONP filter in front of the router
//! - Bind server to listener with graceful shutdown

use std::future::Future;
use std::time::Duration;

use axum::{
    extract::Request,
    http::header,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router, ServiceExt,
};
use serde_json::json;
use tokio::net::TcpListener;
use tower::Layer;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::GatewayConfig;
use crate::jsonp::{JsonpLayer, JsonpService};

/// HTTP server for the demo gateway.
pub struct HttpServer {
    app: JsonpService<Router>,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let app = build_app(&config);
        Self { app, config }
    }

    /// Run until Ctrl+C.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        self.run_until(listener, shutdown_signal()).await
    }

    /// Run until `shutdown` resolves.
    pub async fn run_until<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            trigger = %self.config.jsonp.trigger,
            extra_security = self.config.jsonp.extra_security,
            "HTTP server starting"
        );

        let make_service = ServiceExt::<Request>::into_make_service(self.app);
        axum::serve(listener, make_service)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Build the demo application with the JSONP filter as the outermost layer.
///
/// The filter must sit outside the router: a layer added with
/// `Router::layer` runs after route matching and its URI rewrite would be
/// too late to reach `/action.json`.
#[allow(deprecated)]
pub fn build_app(config: &GatewayConfig) -> JsonpService<Router> {
    let router = Router::new()
        .route("/action.json", get(action_json).post(action_json))
        .route("/action.js", get(action_js))
        .route("/action.html", get(action_html))
        .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
        .layer(TraceLayer::new_for_http());

    JsonpLayer::new(config.jsonp.clone()).layer(router)
}

async fn action_json() -> impl IntoResponse {
    Json(json!({ "key": "value" }))
}

async fn action_js() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/javascript")], r#"{"key":"value"}"#)
}

async fn action_html() -> impl IntoResponse {
    Html("<p>not json</p>")
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
