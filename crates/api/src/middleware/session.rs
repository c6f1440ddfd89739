//! Cookie session middleware for protected routes.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use talentscan_shared::{Claims, JwtError};
use tracing::debug;

use crate::{AppState, error::ApiError};

/// Resolves the session cookie into [`Claims`].
///
/// Requests without a valid session are answered with 401 before any
/// handler runs. Claims are stored in request extensions for [`AuthUser`].
pub async fn session_middleware(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(cookie) = jar.get(&state.cookie_name) else {
        return ApiError::unauthorized("Authentication required").into_response();
    };

    match state.jwt_service.validate_token(cookie.value()) {
        Ok(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        Err(e) => {
            debug!(error = %e, "Rejected session cookie");
            let message = match e {
                JwtError::Expired => "Session has expired",
                _ => "Invalid session",
            };
            ApiError::unauthorized(message).into_response()
        }
    }
}

/// Extractor for the authenticated session.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);

impl AuthUser {
    /// Returns the inner claims.
    #[must_use]
    pub const fn claims(&self) -> &Claims {
        &self.0
    }

    /// Fails with 403 unless this session may modify `code`.
    ///
    /// # Errors
    ///
    /// Returns a forbidden [`ApiError`].
    pub fn require_editor(&self, code: &str) -> Result<(), ApiError> {
        if self.0.can_edit(code) {
            Ok(())
        } else {
            Err(ApiError::forbidden("You cannot modify this profile"))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
