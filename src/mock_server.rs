//! In-process request interceptor.
//!
//! The UI layer talks to the API through [`MockServer::handle`] instead of a
//! socket: requests whose method and path match a mock route are dispatched
//! straight into the axum router, everything else is refused with
//! [`ApiFault::Unmatched`] so the caller can pass it through to a real network.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode, Uri},
    Router,
};
use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;
use tower::ServiceExt;

use crate::error::{ApiFault, StoreFault};
use crate::routes::api_router;
use crate::AppState;

const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

/// Method and path pattern of every mocked endpoint.
const MOCK_ROUTES: &[(&str, &str)] = &[
    ("GET", "/health"),
    ("GET", "/__seed"),
    ("GET", "/jobs"),
    ("POST", "/jobs"),
    ("PATCH", "/jobs/:id"),
    ("PATCH", "/jobs/:id/reorder"),
    ("GET", "/candidates"),
    ("GET", "/candidates/:id"),
    ("PATCH", "/candidates/:id"),
    ("GET", "/candidates/:id/timeline"),
    ("GET", "/assessments/:job_id"),
    ("PUT", "/assessments/:job_id"),
    ("POST", "/assessments/:job_id/submit"),
];

#[derive(Debug, Clone)]
pub struct MockRequest {
    pub method: Method,
    pub uri: String,
    pub body: Option<JsonValue>,
}

impl MockRequest {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: JsonValue) -> Self {
        self.body = Some(body);
        self
    }
}

#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: StatusCode,
    pub body: JsonValue,
}

impl MockResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiFault> {
        serde_json::from_value(self.body.clone()).map_err(|e| ApiFault::Body(e.to_string()))
    }

    /// Message of an `{ "error": ... }` body.
    pub fn error_message(&self) -> Option<&str> {
        self.body.get("error").and_then(JsonValue::as_str)
    }
}

#[derive(Clone)]
pub struct MockServer {
    router: Router,
}

impl MockServer {
    pub fn new(state: AppState) -> Self {
        Self {
            router: api_router(state),
        }
    }

    /// Whether `method` and `uri` address a mocked endpoint. The query string is ignored.
    pub fn intercepts(method: &Method, uri: &str) -> bool {
        let path = uri.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
        MOCK_ROUTES
            .iter()
            .any(|(m, pattern)| *m == method.as_str() && path_matches(pattern, path))
    }

    pub async fn handle(&self, request: MockRequest) -> Result<MockResponse, ApiFault> {
        if !Self::intercepts(&request.method, &request.uri) {
            return Err(ApiFault::Unmatched {
                method: request.method.to_string(),
                path: request.uri,
            });
        }

        let uri: Uri = request
            .uri
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| ApiFault::Body(e.to_string()))?;
        let body = match &request.body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let http_request = Request::builder()
            .method(request.method.clone())
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(body)?;

        let response = match self.router.clone().oneshot(http_request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };

        if let Some(StoreFault(message)) = response.extensions().get::<StoreFault>() {
            return Err(ApiFault::Storage(message.clone()));
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), MAX_BODY_BYTES)
            .await
            .map_err(|e| ApiFault::Body(e.to_string()))?;
        let body = if bytes.is_empty() {
            JsonValue::Null
        } else {
            serde_json::from_slice(&bytes).map_err(|e| ApiFault::Body(e.to_string()))?
        };

        tracing::debug!(
            method = %request.method,
            uri = %request.uri,
            status = status.as_u16(),
            "mock request handled"
        );
        Ok(MockResponse { status, body })
    }

    pub async fn get(&self, uri: &str) -> Result<MockResponse, ApiFault> {
        self.handle(MockRequest::new(Method::GET, uri)).await
    }

    pub async fn post(&self, uri: &str, body: JsonValue) -> Result<MockResponse, ApiFault> {
        self.handle(MockRequest::new(Method::POST, uri).with_body(body))
            .await
    }

    pub async fn patch(&self, uri: &str, body: JsonValue) -> Result<MockResponse, ApiFault> {
        self.handle(MockRequest::new(Method::PATCH, uri).with_body(body))
            .await
    }

    pub async fn put(&self, uri: &str, body: JsonValue) -> Result<MockResponse, ApiFault> {
        self.handle(MockRequest::new(Method::PUT, uri).with_body(body))
            .await
    }
}

/// Segment-wise match, strict about trailing slashes the same way the router is.
fn path_matches(pattern: &str, path: &str) -> bool {
    let mut want = pattern.split('/');
    let mut got = path.split('/');
    loop {
        match (want.next(), got.next()) {
            (None, None) => return true,
            (Some(w), Some(g)) if w.starts_with(':') => {
                if g.is_empty() {
                    return false;
                }
            }
            (Some(w), Some(g)) if w == g => {}
            _ => return false,
        }
    }
}
