//! # Admin Sessions
//!
//! Stub login: any non-empty username gets a session token. Admin handlers
//! take an [`AdminSession`] argument, so an endpoint without one can't be
//! reached without logging in.
//!
//! ```text
//! POST /api/admin/login { "username": "vidya" }
//!      └─► { "token": "3f1c…", "username": "vidya", ... }
//!
//! GET /api/admin/dashboard
//!      x-admin-session: 3f1c…      ─► AdminSession extracted ─► handler
//!      (missing / unknown token)   ─► 401 NOT_LOGGED_IN
//! ```

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;
use workshop_core::validation::validate_required;

use super::AppState;
use crate::error::{ApiError, ApiResult};

/// Header carrying the session token.
pub const SESSION_HEADER: &str = "x-admin-session";

/// A logged-in admin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminSession {
    pub token: String,
    pub username: String,
    pub started_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, AdminSession>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session for `username`.
    pub fn login(&self, username: &str, at: DateTime<Utc>) -> ApiResult<AdminSession> {
        let username = validate_required("username", username)?;
        let session = AdminSession {
            token: Uuid::new_v4().to_string(),
            username,
            started_at: at,
        };

        self.sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(session.token.clone(), session.clone());

        info!(username = %session.username, "Admin logged in");
        Ok(session)
    }

    /// Ends a session. Returns whether the token was live.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .remove(token);
        if let Some(session) = &removed {
            info!(username = %session.username, "Admin logged out");
        }
        removed.is_some()
    }

    pub fn get(&self, token: &str) -> Option<AdminSession> {
        self.sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(token)
            .cloned()
    }
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(SESSION_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(ApiError::not_logged_in)?;

        match state.sessions.get(token) {
            Some(session) => Ok(session),
            None => {
                debug!("Unknown admin session token");
                Err(ApiError::not_logged_in())
            }
        }
    }
}
