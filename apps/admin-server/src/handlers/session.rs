//! Admin login / logout.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::state::{AdminSession, AppState};

/// Login form. Any other field (a password) is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
}

pub async fn login(State(state): State<AppState>, Json(request): Json<LoginRequest>) -> ApiResult<Json<AdminSession>> {
    let session = state.sessions.login(&request.username, state.now().to_utc())?;
    Ok(Json(session))
}

pub async fn logout(admin: AdminSession, State(state): State<AppState>) -> StatusCode {
    state.sessions.logout(&admin.token);
    StatusCode::NO_CONTENT
}

pub async fn current_session(admin: AdminSession) -> Json<AdminSession> {
    Json(admin)
}
