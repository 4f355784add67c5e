use axum::{extract::FromRequestParts, http::request::Parts};

use crate::{
    api::{ApiError, SESSION_HEADER, header_value},
    management::Session,
    server::AppState,
};

/// The live session named by the `X-Session-Id` header.
///
/// Looking it up refreshes the session's last access time.
pub struct CurrentSession(pub Session);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(session_id) = header_value(&parts.headers, SESSION_HEADER) else {
            return Err(ApiError::Unauthorized("Session ID is required".to_string()));
        };

        state
            .auth
            .session(&session_id)
            .await
            .map(CurrentSession)
            .ok_or_else(|| ApiError::Unauthorized("Invalid or expired session".to_string()))
    }
}
