//! Error types for the echo pipeline.
//!
//! Errors are rendered as `{"message": ...}` JSON documents with the status
//! code carried by [`EchoErrorCode`]. Decode and validation failures are
//! handled locally by the responsible handler; only unexpected faults reach
//! the recovery boundary.

use http::StatusCode;

/// Well-known error categories with their HTTP status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[non_exhaustive]
pub enum EchoErrorCode {
    /// Malformed client input: unparseable JSON body, bad multipart
    /// boundary, invalid status code parameter.
    BadRequest,
    /// Missing or rejected credentials on an auth endpoint.
    Unauthorized,
    /// No route matched the request path.
    NotFound,
    /// A route matched the path but not the request method.
    MethodNotAllowed,
    /// Unexpected server-side fault, including recovered panics.
    #[default]
    Internal,
}

impl EchoErrorCode {
    /// The HTTP status code this error category maps to.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error type carried through the echo request pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct EchoError {
    /// The error category.
    pub code: EchoErrorCode,
    /// Human-readable message included in the JSON error document.
    pub message: String,
}

impl EchoError {
    /// Create an error with an explicit code and message.
    #[must_use]
    pub fn with_message(code: EchoErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Malformed client input.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_message(EchoErrorCode::BadRequest, message)
    }

    /// No route matched the given path.
    #[must_use]
    pub fn not_found(path: &str) -> Self {
        Self::with_message(EchoErrorCode::NotFound, format!("no route for {path}"))
    }

    /// A route matched the path but rejected the method.
    #[must_use]
    pub fn method_not_allowed(method: &str) -> Self {
        Self::with_message(
            EchoErrorCode::MethodNotAllowed,
            format!("method {method} not allowed"),
        )
    }

    /// Unexpected server-side fault.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::with_message(EchoErrorCode::Internal, message)
    }

    /// The HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        self.code.status_code()
    }
}
