//! HTTP API layer with Axum routes and middleware.
//!
//! This crate provides:
//! - REST API routes for uploads, profiles and history
//! - Cookie session middleware
//! - Request extractors
//! - Error responses

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use talentscan_core::history::HistoryService;
use talentscan_core::profile::ProfileService;
use talentscan_core::upload::UploadService;
use talentscan_shared::JwtService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// Verifies session tokens.
    pub jwt_service: Arc<JwtService>,
    /// Name of the session cookie.
    pub cookie_name: Arc<str>,
    /// Upload slot issuing and confirmation.
    pub uploads: Arc<UploadService>,
    /// Profile reads and edits.
    pub profiles: Arc<ProfileService>,
    /// Scan/save statistics.
    pub history: Arc<HistoryService>,
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", routes::api_routes_with_state(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
