use axum::{
    extract::State,
    http::HeaderMap,
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::Result;
use crate::services::{AuthService, Session};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Session>> {
    payload.validate()?;

    let auth_service = AuthService::new(state.sessions.clone());
    let session = auth_service.login(&payload.username, &payload.password)?;
    Ok(Json(session))
}

#[derive(Debug, Serialize)]
pub struct LogoutResponse {
    pub message: &'static str,
    pub session_ended: bool,
}

async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<LogoutResponse>> {
    let token = headers
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "));

    let auth_service = AuthService::new(state.sessions.clone());
    let session_ended = token.map_or(false, |token| auth_service.logout(token));

    Ok(Json(LogoutResponse {
        message: "Logged out successfully",
        session_ended,
    }))
}
