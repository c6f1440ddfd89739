//! Profile error types.

use talentscan_shared::AppError;
use thiserror::Error;

use super::validation::ProfileValidationError;

/// Errors from profile operations.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// No student with this code.
    #[error("Student not found: {0}")]
    NotFound(String),

    /// The update violates one or more field rules.
    #[error("Invalid profile update: {}", join_violations(.0))]
    Validation(Vec<ProfileValidationError>),

    /// Record store failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ProfileError {
    /// Create a not found error.
    #[must_use]
    pub fn not_found(code: impl Into<String>) -> Self {
        Self::NotFound(code.into())
    }

    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }

    /// Field-level violation messages, empty for other errors.
    #[must_use]
    pub fn details(&self) -> Vec<String> {
        match self {
            Self::Validation(violations) => violations.iter().map(ToString::to_string).collect(),
            _ => Vec::new(),
        }
    }
}

fn join_violations(violations: &[ProfileValidationError]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<ProfileError> for AppError {
    fn from(err: ProfileError) -> Self {
        match err {
            ProfileError::NotFound(_) => Self::NotFound("Student not found".to_string()),
            ProfileError::Validation(_) => Self::Validation("Invalid profile update".to_string()),
            ProfileError::Repository(msg) => Self::Upstream(msg),
        }
    }
}
