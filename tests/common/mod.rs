//! Shared utilities for the integration tests.

use std::convert::Infallible;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use tower::service_fn;
use tower::util::BoxCloneService;

/// Response the stub inner handler returns for every call.
#[derive(Clone)]
pub struct Canned {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub chunks: Vec<&'static str>,
}

impl Canned {
    /// 200, `application/json`, `{"key":"value"}`.
    pub fn json() -> Self {
        Self {
            status: StatusCode::OK,
            headers: vec![("content-type", "application/json"), ("content-length", "15")],
            chunks: vec![r#"{"key":"value"}"#],
        }
    }

    pub fn with_content_type(mut self, content_type: &'static str) -> Self {
        for (name, value) in self.headers.iter_mut() {
            if *name == "content-type" {
                *value = content_type;
            }
        }
        self
    }
}

/// Inner handler stub that counts calls and remembers the URIs it saw.
#[derive(Clone, Default)]
pub struct Stub {
    pub calls: Arc<AtomicUsize>,
    pub seen: Arc<Mutex<Vec<String>>>,
}

impl Stub {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn service(&self, canned: Canned) -> BoxCloneService<Request<Body>, Response<Body>, Infallible> {
        let calls = self.calls.clone();
        let seen = self.seen.clone();
        BoxCloneService::new(service_fn(move |req: Request<Body>| {
            calls.fetch_add(1, Ordering::SeqCst);
            seen.lock().unwrap().push(req.uri().to_string());
            let canned = canned.clone();
            async move { Ok::<_, Infallible>(build(canned)) }
        }))
    }
}

/// Build the canned response, streaming each chunk as a separate frame.
fn build(canned: Canned) -> Response<Body> {
    let frames = canned
        .chunks
        .into_iter()
        .map(|c| Ok::<_, Infallible>(axum::body::Bytes::from_static(c.as_bytes())));
    let mut builder = Response::builder().status(canned.status);
    for (name, value) in canned.headers {
        builder = builder.header(name, value);
    }
    builder
        .body(Body::from_stream(futures_util::stream::iter(frames)))
        .unwrap()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

pub fn content_type(response: &Response<Body>) -> Option<&str> {
    response.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
}
