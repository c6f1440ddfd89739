//! Client error types.

use talentscan_shared::portal::ErrorBody;
use thiserror::Error;

/// Errors talking to the portal API or object storage.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The API answered with an error body.
    #[error("{message} ({status})")]
    Api {
        /// HTTP status.
        status: u16,
        /// Message from the error body.
        message: String,
        /// Field-level violations, if any.
        details: Vec<String>,
    },

    /// The direct upload to the signed URL was refused.
    #[error("storage rejected the upload ({status})")]
    Storage {
        /// HTTP status returned by storage.
        status: u16,
    },

    /// The file is larger than the slot allows.
    #[error("file is {size} bytes, the limit is {max}")]
    FileTooLarge {
        /// File size.
        size: u64,
        /// Slot limit.
        max: u64,
    },

    /// Connection or decoding failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl ClientError {
    /// Build from a status and a response body that may or may not be an [`ErrorBody`].
    #[must_use]
    pub fn from_response(status: u16, body: &[u8]) -> Self {
        match serde_json::from_slice::<ErrorBody>(body) {
            Ok(err) => Self::Api {
                status,
                message: err.message,
                details: err.details,
            },
            Err(_) => Self::Api {
                status,
                message: String::from_utf8_lossy(body).trim().to_string(),
                details: Vec::new(),
            },
        }
    }

    /// HTTP status, when the failure came with one.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Storage { status } => Some(*status),
            Self::FileTooLarge { .. } | Self::Transport(_) => None,
        }
    }
}
