use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde_json::{Value, json};

use crate::{
    api::{CurrentSession, SESSION_HEADER, header_value},
    server::AppState,
    types::{LoginRequest, LoginResponse},
};

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> (StatusCode, Json<LoginResponse>) {
    if request.email.trim().is_empty() || request.password.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(LoginResponse::rejected("Email and password are required")),
        );
    }

    match state.auth.login(&request.email, &request.password).await {
        Ok(session) => (
            StatusCode::OK,
            Json(LoginResponse {
                user_id: session.user_id,
                session_id: session.session_id,
                success: true,
                error_message: None,
            }),
        ),
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(LoginResponse::rejected("Invalid email or password")),
        ),
    }
}

/// POST /api/auth/logout
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> StatusCode {
    if let Some(session_id) = header_value(&headers, SESSION_HEADER) {
        state.auth.logout(&session_id).await;
    }
    StatusCode::OK
}

/// GET /api/auth/validate
pub async fn validate(CurrentSession(session): CurrentSession) -> Json<Value> {
    Json(json!({
        "userId": session.user_id,
        "valid": true,
    }))
}
