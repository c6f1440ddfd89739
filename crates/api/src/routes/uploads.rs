//! Upload slot routes.

use axum::{Json, Router, extract::State, routing::post};
use talentscan_core::upload::UploadError;
use talentscan_shared::portal::{IssueSlotRequest, SlotResponse};

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the upload routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/uploads", post(issue_slot))
}

/// POST /uploads - Issue a signed upload slot for the session's student.
async fn issue_slot(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(payload): ApiJson<IssueSlotRequest>,
) -> Result<Json<SlotResponse>, ApiError> {
    let code = auth
        .claims()
        .student_code()
        .ok_or(UploadError::NotAStudent)?;

    let slot = state
        .uploads
        .issue_slot(code, payload.purpose, &payload.content_type)
        .await?;

    Ok(Json(slot.into()))
}
