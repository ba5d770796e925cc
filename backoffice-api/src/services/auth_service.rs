// Auth service - stub sessions for the back-office operator
//
// Any non-empty username/password pair signs in as the single acting admin.
use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::services::{ACTING_ADMIN_ID, ACTING_ADMIN_NAME};

#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    pub admin_id: String,
    pub admin_name: String,
    pub signed_in_at: DateTime<Utc>,
}

/// Open sessions keyed by token. Cloning shares the registry.
#[derive(Clone, Default)]
pub struct Sessions {
    inner: Arc<DashMap<String, Session>>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, token: &str) -> Option<Session> {
        self.inner.get(token).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

pub struct AuthService {
    sessions: Sessions,
}

impl AuthService {
    pub fn new(sessions: Sessions) -> Self {
        Self { sessions }
    }

    pub fn login(&self, username: &str, password: &str) -> Result<Session> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(AppError::BadRequest("Username and password are required".to_string()));
        }

        let session = Session {
            token: Uuid::new_v4().to_string(),
            username: username.to_string(),
            admin_id: ACTING_ADMIN_ID.to_string(),
            admin_name: ACTING_ADMIN_NAME.to_string(),
            signed_in_at: Utc::now(),
        };
        self.sessions
            .inner
            .insert(session.token.clone(), session.clone());

        info!(username = %session.username, "admin signed in");
        Ok(session)
    }

    /// Ends the session if it exists. Returns whether it did.
    pub fn logout(&self, token: &str) -> bool {
        let removed = self.sessions.inner.remove(token).is_some();
        if removed {
            info!("admin signed out");
        }
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_requires_credentials() {
        let service = AuthService::new(Sessions::new());
        assert!(matches!(service.login("  ", "secret"), Err(AppError::BadRequest(_))));
        assert!(matches!(service.login("admin", ""), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_login_then_logout() {
        let sessions = Sessions::new();
        let service = AuthService::new(sessions.clone());

        let session = service.login("admin", "secret").unwrap();
        assert_eq!(session.admin_id, ACTING_ADMIN_ID);
        assert_eq!(sessions.get(&session.token).map(|s| s.username), Some("admin".to_string()));

        assert!(service.logout(&session.token));
        assert!(!service.logout(&session.token));
        assert!(sessions.is_empty());
    }
}
