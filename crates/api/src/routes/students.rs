//! Student profile, asset confirmation and history routes.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use talentscan_core::profile::ProfileUpdate;
use talentscan_shared::portal::{
    ConfirmUploadRequest, ConfirmUploadResponse, HistoryResponse, ProfileResponse, UploadPurpose,
};

use crate::{AppState, error::ApiError, extractors::ApiJson, middleware::AuthUser};

/// Creates the student routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/students/{code}", get(get_profile).patch(update_profile))
        .route("/students/{code}/avatar", post(confirm_avatar))
        .route("/students/{code}/cv", post(confirm_cv))
        .route("/students/{code}/history", get(get_history))
}

/// GET /students/{code}
async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let profile = state.profiles.get(&code).await?;
    Ok(Json(profile.into()))
}

/// PATCH /students/{code} - Partial update of bio, links and interests.
async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
    ApiJson(update): ApiJson<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, ApiError> {
    auth.require_editor(&code)?;
    let profile = state.profiles.update(&code, update).await?;
    Ok(Json(profile.into()))
}

/// POST /students/{code}/avatar
async fn confirm_avatar(
    state: State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
    payload: ApiJson<ConfirmUploadRequest>,
) -> Result<Json<ConfirmUploadResponse>, ApiError> {
    confirm(state, &auth, &code, payload, UploadPurpose::Avatar).await
}

/// POST /students/{code}/cv
async fn confirm_cv(
    state: State<AppState>,
    auth: AuthUser,
    Path(code): Path<String>,
    payload: ApiJson<ConfirmUploadRequest>,
) -> Result<Json<ConfirmUploadResponse>, ApiError> {
    confirm(state, &auth, &code, payload, UploadPurpose::Cv).await
}

async fn confirm(
    State(state): State<AppState>,
    auth: &AuthUser,
    code: &str,
    ApiJson(payload): ApiJson<ConfirmUploadRequest>,
    purpose: UploadPurpose,
) -> Result<Json<ConfirmUploadResponse>, ApiError> {
    auth.require_editor(code)?;

    let confirmed = state
        .uploads
        .confirm(code, payload.upload_id, purpose)
        .await?;
    Ok(Json(confirmed.into()))
}

/// GET /students/{code}/history - Scan/save counters and recent saves.
async fn get_history(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(code): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let history = state.history.get(&code).await?;
    Ok(Json(history.into()))
}
