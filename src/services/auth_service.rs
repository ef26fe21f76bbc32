// src/services/auth_service.rs
//
// Auth Service - admin sign-in and the session guard
//
// RULES:
// - The session lives in the context's SessionHandle, never in a global
// - Admin mutations call `require_session` before touching a collaborator
// - Sign-in failures are notified and returned, never retried

use std::sync::{Arc, PoisonError};

use chrono::Utc;

use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionEnded, SessionStarted};
use crate::integrations::{AuthProvider, Credentials, NotificationSink, Session, SessionHandle};

use super::notices::{report_failure, report_success};

/// The live, unexpired session or `AppError::Auth`
pub fn require_session(handle: &SessionHandle) -> AppResult<Session> {
    let guard = handle.read().unwrap_or_else(PoisonError::into_inner);
    match guard.as_ref() {
        None => Err(AppError::Auth("Sign in required".to_string())),
        Some(session) if session.is_expired(Utc::now()) => {
            Err(AppError::Auth("Session expired, sign in again".to_string()))
        }
        Some(session) => Ok(session.clone()),
    }
}

pub struct AuthService {
    provider: Arc<dyn AuthProvider>,
    session: SessionHandle,
    notifier: Arc<dyn NotificationSink>,
    event_bus: Arc<EventBus>,
}

impl AuthService {
    pub fn new(
        provider: Arc<dyn AuthProvider>,
        session: SessionHandle,
        notifier: Arc<dyn NotificationSink>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            provider,
            session,
            notifier,
            event_bus,
        }
    }

    pub async fn sign_in(&self, credentials: Credentials) -> AppResult<Session> {
        match self.authenticate(&credentials).await {
            Ok(session) => {
                *self.session.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
                self.event_bus.emit(SessionStarted::new(session.email.clone()));
                report_success(&*self.notifier, "Signed in");
                Ok(session)
            }
            Err(e) => Err(report_failure(&*self.notifier, "Sign in", e)),
        }
    }

    async fn authenticate(&self, credentials: &Credentials) -> AppResult<Session> {
        if credentials.email.trim().is_empty() || credentials.password.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        self.provider.sign_in(credentials).await.map_err(|e| match e {
            AppError::Auth(_) => e,
            other => AppError::Auth(other.to_string()),
        })
    }

    /// Drop the current session. Signing out while signed out is a no-op.
    pub fn sign_out(&self) {
        let previous = self
            .session
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(session) = previous {
            self.event_bus.emit(SessionEnded::new(session.email));
            report_success(&*self.notifier, "Signed out");
        }
    }

    pub fn current_session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.require_session().is_ok()
    }

    pub fn require_session(&self) -> AppResult<Session> {
        require_session(&self.session)
    }
}
