//! Upload error types.

use talentscan_shared::AppError;
use talentscan_shared::portal::UploadPurpose;
use talentscan_shared::types::UploadId;
use thiserror::Error;

use crate::profile::ProfileError;
use crate::storage::StorageError;

/// Errors from issuing or confirming uploads.
#[derive(Debug, Error)]
pub enum UploadError {
    /// No slot with this id, or it belongs to another student.
    #[error("Upload slot not found: {0}")]
    SlotNotFound(UploadId),

    /// The slot's signed URL has expired.
    #[error("Upload slot {0} has expired")]
    SlotExpired(UploadId),

    /// The slot was already bound to a different student.
    #[error("Upload slot {0} was already used")]
    SlotConsumed(UploadId),

    /// Nothing was written at the slot's key.
    #[error("No uploaded object at {key}")]
    BlobMissing {
        /// Object key that was checked.
        key: String,
    },

    /// No student with this code.
    #[error("Student not found: {0}")]
    StudentNotFound(String),

    /// The content type is not accepted for this purpose.
    #[error("Content type {content_type} is not allowed for {purpose}")]
    UnsupportedContentType {
        /// Requested purpose.
        purpose: UploadPurpose,
        /// Rejected content type.
        content_type: String,
    },

    /// The slot was issued for another purpose.
    #[error("Upload slot is for {actual}, not {expected}")]
    PurposeMismatch {
        /// Purpose of the endpoint.
        expected: UploadPurpose,
        /// Purpose the slot was issued for.
        actual: UploadPurpose,
    },

    /// Only student sessions may request upload slots.
    #[error("Upload slots can only be issued to students")]
    NotAStudent,

    /// Object storage failure.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Profile record failure.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// Slot store failure.
    #[error("Repository error: {0}")]
    Repository(String),
}

impl UploadError {
    /// Create a repository error.
    #[must_use]
    pub fn repository(msg: impl Into<String>) -> Self {
        Self::Repository(msg.into())
    }
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::SlotNotFound(_)
            | UploadError::SlotExpired(_)
            | UploadError::SlotConsumed(_) => Self::NotFound("Invalid upload id".to_string()),
            UploadError::BlobMissing { .. } => {
                Self::NotFound("Uploaded file not found".to_string())
            }
            UploadError::StudentNotFound(_) => Self::NotFound("Student not found".to_string()),
            e @ (UploadError::UnsupportedContentType { .. }
            | UploadError::PurposeMismatch { .. }) => Self::Validation(e.to_string()),
            e @ UploadError::NotAStudent => Self::Forbidden(e.to_string()),
            UploadError::Storage(e) => e.into(),
            UploadError::Profile(e) => e.into(),
            UploadError::Repository(msg) => Self::Upstream(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_errors_are_indistinguishable_to_callers() {
        let id = UploadId::new();
        for err in [
            UploadError::SlotNotFound(id),
            UploadError::SlotExpired(id),
            UploadError::SlotConsumed(id),
        ] {
            let app: AppError = err.into();
            assert_eq!(app.status_code(), 404);
            assert_eq!(app.public_message(), "Invalid upload id");
        }
    }

    #[test]
    fn test_purpose_mismatch_is_validation() {
        let app: AppError = UploadError::PurposeMismatch {
            expected: UploadPurpose::Cv,
            actual: UploadPurpose::Avatar,
        }
        .into();
        assert_eq!(app.status_code(), 400);
        assert_eq!(app.public_message(), "Upload slot is for avatar, not cv");
    }

    #[test]
    fn test_storage_failure_is_upstream() {
        let app: AppError = UploadError::from(StorageError::operation("timeout")).into();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.error_code(), "UPSTREAM_ERROR");
    }
}
