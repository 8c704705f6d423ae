//! JSONP filter as a tower middleware.
//!
//! Per request:
//! 1. Look up `callback` (query string, then form body when relevant).
//! 2. Decide whether the request is a JSONP request.
//! 3. Reject with a bare 400 if it is and the callback is not valid.
//! 4. Rewrite `.jsonp` to `.json` in the URI so the inner service serves its
//!    plain JSON endpoint.
//! 5. Call the inner service.
//! 6. Wrap JSON/JavaScript responses in the callback.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Request, Response, StatusCode},
};
use futures_util::{stream, StreamExt};
use tower::{Layer, Service};

use crate::config::JsonpConfig;
use crate::error::JsonpError;
use crate::jsonp::{callback::Callback, content_type, params, trigger, wrap, Trigger};
use crate::observability::metrics::{record_outcome, Outcome};

/// Attached to triggered requests before they reach the inner service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonpRequest {
    /// The validated callback name.
    pub callback: Callback,
    /// Request path as received, before `.jsonp` was rewritten.
    pub original_path: String,
}

/// Layer that applies [`JsonpService`] to an inner service.
#[derive(Debug, Clone, Default)]
pub struct JsonpLayer {
    config: Arc<JsonpConfig>,
}

impl JsonpLayer {
    pub fn new(config: JsonpConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn config(&self) -> &JsonpConfig {
        &self.config
    }
}

impl<S> Layer<S> for JsonpLayer {
    type Service = JsonpService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        JsonpService {
            inner,
            config: self.config.clone(),
        }
    }
}

/// Middleware turning JSON responses into JSONP responses.
#[derive(Debug, Clone)]
pub struct JsonpService<S> {
    inner: S,
    config: Arc<JsonpConfig>,
}

impl<S> JsonpService<S> {
    pub fn new(inner: S, config: JsonpConfig) -> Self {
        JsonpLayer::new(config).layer(inner)
    }
}

impl<S> Service<Request<Body>> for JsonpService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: 'static,
{
    type Response = Response<Body>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        // Take the service that was driven to readiness, leave a clone behind.
        let clone = self.inner.clone();
        let inner = std::mem::replace(&mut self.inner, clone);
        let config = self.config.clone();

        Box::pin(handle(inner, config, req))
    }
}

async fn handle<S>(
    mut inner: S,
    config: Arc<JsonpConfig>,
    req: Request<Body>,
) -> Result<Response<Body>, S::Error>
where
    S: Service<Request<Body>, Response = Response<Body>>,
{
    let path = req.uri().path().to_string();

    let Lookup {
        mut req,
        callback,
        form_error,
    } = lookup_callback(&config, req).await;

    if !config.trigger.is_triggered(&path, callback.is_some()) {
        tracing::trace!(path = %path, "Not a JSONP request");
        record_outcome(Outcome::Passthrough);
        return inner.call(req).await;
    }

    if let Some(err) = form_error {
        return Ok(reject(&path, &err));
    }

    let callback = match Callback::parse(callback.as_deref()) {
        Ok(cb) => cb,
        Err(err) => return Ok(reject(&path, &err)),
    };

    let rewritten = trigger::rewrite_uri(req.uri());
    *req.uri_mut() = rewritten;
    req.extensions_mut().insert(JsonpRequest {
        callback: callback.clone(),
        original_path: path.clone(),
    });

    let response = inner.call(req).await?;

    let wrappable = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(content_type::is_wrappable)
        .unwrap_or(false);

    if !wrappable {
        tracing::debug!(
            path = %path,
            status = %response.status(),
            "Response is not JSON, leaving it unwrapped"
        );
        record_outcome(Outcome::Skipped);
        return Ok(response);
    }

    Ok(wrap_response(response, &callback, config.extra_security, &path).await)
}

/// Result of the `callback` lookup. The request always carries a body the
/// inner service can read in full, even when the form could not be parsed.
struct Lookup {
    req: Request<Body>,
    callback: Option<String>,
    /// Set when a form body could not be buffered; `callback` then only
    /// reflects the query string.
    form_error: Option<JsonpError>,
}

/// Find `callback` in the query string and, for form posts that could be
/// JSONP requests, in the body.
async fn lookup_callback(config: &JsonpConfig, req: Request<Body>) -> Lookup {
    let from_query = params::callback_from_query(req.uri().query());

    let may_trigger = match config.trigger {
        Trigger::Extension => trigger::has_jsonp_extension(req.uri().path()),
        Trigger::Callback => true,
    };
    if !may_trigger || !params::is_form(req.headers()) {
        return Lookup {
            req,
            callback: from_query,
            form_error: None,
        };
    }

    let (parts, body) = req.into_parts();
    match buffer_form(body, config.max_form_bytes).await {
        FormBody::Read(bytes) => {
            let from_form = params::callback_from_form(&bytes);
            Lookup {
                req: Request::from_parts(parts, Body::from(bytes)),
                callback: params::merge(from_query, from_form),
                form_error: None,
            }
        }
        FormBody::Unread(body, err) => {
            tracing::debug!(path = %parts.uri.path(), error = %err, "Form body not searched for callback");
            Lookup {
                req: Request::from_parts(parts, body),
                callback: from_query,
                form_error: Some(err),
            }
        }
    }
}

enum FormBody {
    Read(Bytes),
    /// Buffering stopped early; the body replays what was read followed by
    /// the rest of the stream (or the stream's error).
    Unread(Body, JsonpError),
}

async fn buffer_form(body: Body, limit: usize) -> FormBody {
    let mut frames = body.into_data_stream();
    let mut chunks: Vec<Bytes> = Vec::new();
    let mut len = 0usize;

    while let Some(next) = frames.next().await {
        match next {
            Ok(chunk) => {
                len += chunk.len();
                chunks.push(chunk);
                if len > limit {
                    let replay = stream::iter(chunks.into_iter().map(Ok)).chain(frames);
                    let err = JsonpError::FormBody(format!("larger than {limit} bytes"));
                    return FormBody::Unread(Body::from_stream(replay), err);
                }
            }
            Err(e) => {
                let err = JsonpError::FormBody(e.to_string());
                let replay = stream::iter(chunks.into_iter().map(Ok).chain(std::iter::once(Err(e))));
                return FormBody::Unread(Body::from_stream(replay), err);
            }
        }
    }

    let mut buf = Vec::with_capacity(len);
    for chunk in &chunks {
        buf.extend_from_slice(chunk);
    }
    FormBody::Read(Bytes::from(buf))
}

async fn wrap_response(
    response: Response<Body>,
    callback: &Callback,
    extra_security: bool,
    path: &str,
) -> Response<Body> {
    let (mut parts, body) = response.into_parts();

    let json = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::error!(path = %path, error = %e, "Failed to read response body for wrapping");
            let mut response = Response::new(Body::empty());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            return response;
        }
    };

    let wrapped = wrap::wrap(callback, &json, extra_security);

    parts
        .headers
        .insert(header::CONTENT_LENGTH, HeaderValue::from(wrapped.len()));
    if let Some(ct) = parts.headers.get(header::CONTENT_TYPE) {
        let js = content_type::to_javascript(ct);
        parts.headers.insert(header::CONTENT_TYPE, js);
    }

    tracing::debug!(
        path = %path,
        callback = %callback,
        status = %parts.status,
        content_length = wrapped.len(),
        "Wrapped JSON response in callback"
    );
    record_outcome(Outcome::Wrapped);

    Response::from_parts(parts, Body::from(wrapped))
}

/// The sole error response: status 400, no headers, empty body.
fn reject(path: &str, err: &JsonpError) -> Response<Body> {
    tracing::warn!(path = %path, reason = err.reason(), error = %err, "Rejecting JSONP request");
    record_outcome(Outcome::Rejected);

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::BAD_REQUEST;
    response
}
