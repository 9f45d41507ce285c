//! Unified error types for the item service.

use axum::extract::rejection::{BytesRejection, FormRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error};

/// Startup and runtime errors outside a single request.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Metrics recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(String),

    /// IO error (bind, accept, ...).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors returned by item store operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No item with the given id.
    #[error("item {0} not found")]
    NotFound(u64),

    /// The id segment was not an integer; treated as no match.
    #[error("item id {0:?} not found")]
    InvalidId(String),

    /// A required field was missing or empty.
    #[error("{field} is required")]
    MissingField {
        /// Name of the missing field, capitalised for display.
        field: &'static str,
    },
}

/// Request-level errors, rendered as `{success:false, error}` JSON bodies.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No item with the requested id.
    #[error("Item not found")]
    NotFound,

    /// No route matched the request.
    #[error("Route not found")]
    RouteNotFound,

    /// A required field was missing or empty.
    #[error("{0}")]
    Validation(String),

    /// The request body could not be decoded.
    #[error("Invalid request body")]
    BadRequest(String),

    /// Anything else. Details are logged, never returned.
    #[error("Internal server error")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound | ApiError::RouteNotFound => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failure envelope shared by every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Always false.
    pub success: bool,
    /// Human-readable message.
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal(detail) => error!(error = %detail, "request failed"),
            ApiError::BadRequest(detail) => debug!(error = %detail, "rejected request body"),
            _ => {}
        }

        let body = ErrorBody {
            success: false,
            error: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) | StoreError::InvalidId(_) => ApiError::NotFound,
            StoreError::MissingField { .. } => ApiError::Validation(err.to_string()),
        }
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, ServiceError>;
