//! History error types.

use talentscan_shared::AppError;
use thiserror::Error;

/// Errors from history queries.
#[derive(Debug, Error)]
pub enum HistoryError {
    /// No student with this code.
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// Record store failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl From<HistoryError> for AppError {
    fn from(err: HistoryError) -> Self {
        match err {
            HistoryError::StudentNotFound(_) => Self::NotFound("Student not found".to_string()),
            HistoryError::Repository(msg) => Self::Upstream(msg),
        }
    }
}
