//! Unified error handling for admin view-models.

use shopfront_client::ApiError;
use thiserror::Error;

/// Why an admin action did not complete.
///
/// The user has already been notified by the time one of these is returned;
/// callers use it for control flow and exit codes, not for display.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Input rejected locally; no request was made.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An edit was submitted without a product being edited.
    #[error("No product selected for editing")]
    NoSelection,

    /// A selected image file could not be read.
    #[error("Image error: {0}")]
    Image(#[from] std::io::Error),

    /// The store call failed.
    #[error(transparent)]
    Store(#[from] ApiError),
}

impl AdminError {
    /// Text to show the user: the backend's own message when it sent one,
    /// otherwise `fallback`.
    #[must_use]
    pub fn user_message<'a>(&'a self, fallback: &'a str) -> &'a str {
        match self {
            Self::Store(e) => e.backend_message().unwrap_or(fallback),
            Self::Validation(message) => message,
            Self::NoSelection | Self::Image(_) => fallback,
        }
    }
}

/// Result type for admin actions.
pub type AdminResult<T> = Result<T, AdminError>;
