//! Error handling for the tiny-webhook server

use axum::{
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Server error types
#[derive(Debug, Error)]
pub enum ServerError {
    /// The request body was not valid JSON
    #[error("{0}")]
    MalformedPayload(#[from] serde_json::Error),

    /// No hook matched the payload
    #[error("Configuration does not have a hook to handle this request")]
    Unhandled,

    /// Neither POST nor an enabled GET
    #[error("Invalid HTTP method: {0}")]
    MethodNotAllowed(Method),
}

impl ServerError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::Unhandled => StatusCode::BAD_REQUEST,
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::MalformedPayload(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.to_string(),
        )
            .into_response()
    }
}

/// Result type for server operations
pub type ServerResult<T> = Result<T, ServerError>;
