//! Error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use talentscan_core::history::HistoryError;
use talentscan_core::profile::ProfileError;
use talentscan_core::upload::UploadError;
use talentscan_shared::AppError;
use talentscan_shared::portal::ErrorBody;
use tracing::error;

/// A failed request, rendered as an [`ErrorBody`].
///
/// Server errors are logged with their cause and answered with a generic
/// message.
#[derive(Debug)]
pub struct ApiError {
    inner: AppError,
    details: Vec<String>,
}

impl ApiError {
    /// Attach field-level violations.
    #[must_use]
    pub fn with_details(mut self, details: Vec<String>) -> Self {
        self.details = details;
        self
    }

    /// 400 with the given message.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::Validation(message.into()).into()
    }

    /// 401 with the given message.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        AppError::Unauthorized(message.into()).into()
    }

    /// 403 with the given message.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::Forbidden(message.into()).into()
    }
}

impl From<AppError> for ApiError {
    fn from(inner: AppError) -> Self {
        Self {
            inner,
            details: Vec::new(),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(err: UploadError) -> Self {
        let details = match &err {
            UploadError::Profile(profile) => profile.details(),
            _ => Vec::new(),
        };
        Self::from(AppError::from(err)).with_details(details)
    }
}

impl From<ProfileError> for ApiError {
    fn from(err: ProfileError) -> Self {
        let details = err.details();
        Self::from(AppError::from(err)).with_details(details)
    }
}

impl From<HistoryError> for ApiError {
    fn from(err: HistoryError) -> Self {
        AppError::from(err).into()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.inner.is_server_error() {
            error!(error = %self.inner, "Request failed");
        }

        let status = StatusCode::from_u16(self.inner.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = ErrorBody {
            error: self.inner.error_code().to_string(),
            status: status.as_u16(),
            message: self.inner.public_message(),
            details: self.details,
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use talentscan_shared::error::GENERIC_ERROR_MESSAGE;
    use talentscan_shared::types::UploadId;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorBody) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_server_error_hides_cause() {
        let (status, body) =
            body_of(AppError::Upstream("connection refused to 10.0.0.3".into()).into()).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "UPSTREAM_ERROR");
        assert_eq!(body.message, GENERIC_ERROR_MESSAGE);
    }

    #[tokio::test]
    async fn test_invalid_slot_is_not_found() {
        let (status, body) = body_of(UploadError::SlotExpired(UploadId::new()).into()).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.status, 404);
        assert_eq!(body.message, "Invalid upload id");
    }

    #[tokio::test]
    async fn test_validation_carries_details() {
        let err = ApiError::bad_request("Invalid profile update")
            .with_details(vec!["bio: too long".into()]);
        let (status, body) = body_of(err).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.details, vec!["bio: too long"]);
    }
}
