//! Error types for the todos API client.
//!
//! # Design
//! HTTP failures are split the way the backend reports them: 422 responses
//! carry one message per invalid field, every other non-2xx status carries a
//! single server message. `Network` holds the fixed, operation-specific text
//! that replaces transport failures and unreadable bodies at the API
//! boundary. `messages()` flattens any variant into the user-facing strings.

use thiserror::Error;

/// Message used when a failed response carries no `message` field.
pub const SERVER_ERROR: &str = "server error";

/// Errors returned by `ApiClient` parse methods and `Backend` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The server returned 422; one rendered `"<field>: <msg>"` per entry.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// The server returned a non-2xx status other than 422.
    #[error("Issue occurred during request: {message}")]
    Request { status: u16, message: String },

    /// The request never completed, or its body was unreadable.
    #[error("{0}")]
    Network(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// User-facing messages, one alert each.
    pub fn messages(&self) -> Vec<String> {
        match self {
            ApiError::Validation(messages) => messages.clone(),
            other => vec![other.to_string()],
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Validation(_) => Some(422),
            ApiError::Request { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Failure to complete an HTTP exchange. Any status code, including 4xx and
/// 5xx, is a completed exchange and never a `TransportError`.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("connection failed: {0}")]
    Connection(String),

    #[error("request timed out")]
    Timeout,

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
