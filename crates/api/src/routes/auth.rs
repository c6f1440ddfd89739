//! Session routes.

use axum::{Json, Router, extract::State, routing::post};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use talentscan_shared::portal::MessageResponse;
use tracing::info;

use crate::AppState;

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new().route("/auth/logout", post(logout))
}

/// POST /auth/logout - Expire the session cookie.
///
/// Always answers 200, with or without a session.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let had_session = jar.get(&state.cookie_name).is_some();

    let mut removal = Cookie::build((state.cookie_name.to_string(), ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    removal.make_removal();

    info!(had_session, "Signed out");

    (
        jar.add(removal),
        Json(MessageResponse {
            message: "Signed out successfully".to_string(),
        }),
    )
}
