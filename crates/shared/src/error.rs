//! Application-wide error types.

use thiserror::Error;

/// Message returned to callers for every 500-class error.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Application error types.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed input or schema mismatch.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or invalid session.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Authenticated, but not allowed to touch the resource.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Missing record or blob.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Object storage or record store failure.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Upstream(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Upstream(_) => "UPSTREAM_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns true for errors whose detail must stay server-side.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code() >= 500
    }

    /// Message safe to put in a response body.
    ///
    /// Server errors collapse to [`GENERIC_ERROR_MESSAGE`].
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg) => msg.clone(),
            Self::Upstream(_) | Self::Internal(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}
