//! # REST API Errors
//!
//! Error type for the booking endpoints and its HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::query::QueryError;
use crate::store::StoreError;

/// Result type for REST operations
pub type ApiResult<T> = Result<T, ApiError>;

/// REST API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed list parameters
    #[error("{0}")]
    InvalidQuery(String),

    /// Request body does not decode as the entity
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Filter or sort names a field the entity lacks, or a value of the
    /// wrong type
    #[error("{0}")]
    InvalidField(String),

    /// Record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Explicit id already taken
    #[error("{0}")]
    Conflict(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Store failure
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidField(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::NotFound { .. } => ApiError::NotFound(message),
            StoreError::UnknownField { .. } | StoreError::TypeMismatch { .. } => {
                ApiError::InvalidField(message)
            }
            StoreError::DuplicateKey { .. } => ApiError::Conflict(message),
            StoreError::InvalidRecord { .. } => ApiError::InvalidBody(message),
            StoreError::UnregisteredTable(_)
            | StoreError::DuplicateTable(_)
            | StoreError::Unavailable(_) => ApiError::Internal(message),
        }
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        match err {
            QueryError::InvalidQuerySyntax(syntax) => ApiError::InvalidQuery(syntax.to_string()),
            QueryError::Store(store) => store.into(),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
