use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    InvalidPayload(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    TransientServer(String),

    #[error("Storage fault: {0}")]
    Store(#[from] StoreError),
}

/// Marker placed on responses produced by a storage fault so the interceptor can
/// surface it as a fault instead of a domain error.
#[derive(Debug, Clone)]
pub struct StoreFault(pub String);

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::InvalidPayload(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            Error::Conflict(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            Error::TransientServer(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            Error::Store(err) => {
                tracing::error!(error = %err, "storage fault while handling request");
                let body = Json(json!({ "error": self.to_string() }));
                let mut response = (StatusCode::INTERNAL_SERVER_ERROR, body).into_response();
                response
                    .extensions_mut()
                    .insert(StoreFault(err.to_string()));
                return response;
            }
            Error::Config(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "An unexpected error occurred".to_string(),
            ),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Error::Validation(rejection.body_text())
    }
}

/// Failures of the interceptor itself, as opposed to non-2xx mock responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiFault {
    #[error("no mock route for {method} {path}")]
    Unmatched { method: String, path: String },

    #[error("storage fault: {0}")]
    Storage(String),

    #[error("invalid request: {0}")]
    Request(#[from] axum::http::Error),

    #[error("malformed response body: {0}")]
    Body(String),
}

impl ApiFault {
    /// The backing store failed. Retrying the same request will not help.
    pub fn is_storage(&self) -> bool {
        matches!(self, ApiFault::Storage(_))
    }
}
