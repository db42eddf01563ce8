//! Store error types.

use serde::Deserialize;
use thiserror::Error;

/// Errors surfaced by the catalog and order stores.
///
/// Stores return these unmodified; view-models decide what the user sees.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The backend rejected the input or a business rule (400, 409, 422).
    #[error("Validation error: {}", message_or(.message, "request rejected"))]
    Validation {
        status: u16,
        message: Option<String>,
    },

    /// The referenced entity does not exist (404).
    #[error("Not found: {}", message_or(.message, "resource not found"))]
    NotFound { message: Option<String> },

    /// Any other non-success response.
    #[error("Server error {status}: {}", message_or(.message, "no details"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    /// The request did not complete (connection, timeout, TLS).
    #[error("Transport error: {0}")]
    Transport(String),

    /// A success response whose body could not be decoded.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Human-readable message supplied by the backend, if any.
    ///
    /// Callers prefer this over their own generic text.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Validation { message, .. }
            | Self::NotFound { message }
            | Self::Server { message, .. } => message.as_deref(),
            Self::Transport(_) | Self::InvalidResponse(_) => None,
        }
    }

    /// Build an error from a non-success status and its raw body.
    #[must_use]
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = ErrorPayload::message_from(body);
        match status {
            400 | 409 | 422 => Self::Validation { status, message },
            404 => Self::NotFound { message },
            _ => Self::Server { status, message },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Result type for store operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error body convention: `{ "error": "..." }`, with `message` accepted as a
/// fallback field.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<serde_json::Value>,
    message: Option<serde_json::Value>,
}

impl ErrorPayload {
    fn message_from(body: &[u8]) -> Option<String> {
        let payload: Self = serde_json::from_slice(body).ok()?;
        let from_error = match payload.error {
            Some(serde_json::Value::String(text)) => Some(text),
            // Some backends nest it: { "error": { "message": "..." } }
            Some(serde_json::Value::Object(map)) => map
                .get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_owned),
            _ => None,
        };
        let from_message = match payload.message {
            Some(serde_json::Value::String(text)) => Some(text),
            _ => None,
        };
        from_error
            .or(from_message)
            .filter(|text| !text.trim().is_empty())
    }
}

fn message_or<'a>(message: &'a Option<String>, fallback: &'a str) -> &'a str {
    message.as_deref().unwrap_or(fallback)
}
