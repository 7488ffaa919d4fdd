// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session store: who is signed in.
//!
//! State machine:
//!
//! ```text
//! Uninitialized ──restore()──▶ Restoring ──▶ Authenticated(user)
//!                                    └─────▶ Anonymous
//! Authenticated ──logout() / any 401──▶ Anonymous
//! ```
//!
//! A user is authenticated only when a stored token AND a user confirmed by
//! `/auth/me` both exist. Nothing is persisted before that confirmation.

use super::api::ApiClient;
use crate::error::Result;
use crate::models::{User, UserCreate, UserLogin};
use crate::storage::{CredentialStore, KeyValueStore};
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::watch;

/// Lifecycle state of the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Uninitialized,
    Restoring,
    Authenticated(User),
    Anonymous,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// True until the one restoration attempt has finished.
    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Uninitialized | SessionState::Restoring)
    }
}

/// Snapshot for views.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub user: Option<User>,
    pub loading: bool,
}

impl From<&SessionState> for Session {
    fn from(state: &SessionState) -> Self {
        Self {
            user: state.user().cloned(),
            loading: state.is_loading(),
        }
    }
}

/// Credentials plus the published session state.
///
/// Shared between the API client (which invalidates it on 401) and the
/// session store (which drives the lifecycle).
pub struct SessionCell {
    credentials: CredentialStore,
    state: watch::Sender<SessionState>,
}

impl SessionCell {
    pub fn new(storage: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(SessionState::Uninitialized);
        Self {
            credentials: CredentialStore::new(storage),
            state,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    fn set(&self, next: SessionState) {
        self.state.send_replace(next);
    }

    /// Leave `Restoring` for `next`. Any other state is left untouched.
    fn settle(&self, next: SessionState) {
        self.state.send_if_modified(|state| {
            if *state == SessionState::Restoring {
                *state = next;
                true
            } else {
                false
            }
        });
    }

    /// Drop all credentials after an unauthorized answer.
    ///
    /// An authenticated session becomes anonymous. A restoration in flight
    /// settles on its own once its request fails.
    pub(crate) fn invalidate(&self) {
        if let Err(e) = self.credentials.clear() {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
        self.state.send_if_modified(|state| {
            if matches!(state, SessionState::Authenticated(_)) {
                *state = SessionState::Anonymous;
                true
            } else {
                false
            }
        });
    }
}

/// Settles a restoration on `Anonymous` if it ends without a verdict,
/// including when the restoring future is dropped mid-request.
struct RestoreGuard<'a> {
    cell: &'a SessionCell,
    settled: bool,
}

impl<'a> RestoreGuard<'a> {
    fn new(cell: &'a SessionCell) -> Self {
        Self {
            cell,
            settled: false,
        }
    }

    fn settle(mut self, next: SessionState) {
        self.cell.settle(next);
        self.settled = true;
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Session restoration interrupted, continuing anonymously");
            self.cell.settle(SessionState::Anonymous);
        }
    }
}

/// Session store.
#[derive(Clone)]
pub struct SessionStore {
    api: ApiClient,
    cell: Arc<SessionCell>,
}

impl SessionStore {
    pub fn new(api: ApiClient) -> Self {
        let cell = Arc::clone(api.session_cell());
        Self { api, cell }
    }

    // ─── Reads ───────────────────────────────────────────────────────────────

    pub fn state(&self) -> SessionState {
        self.cell.state()
    }

    pub fn session(&self) -> Session {
        Session::from(&*self.cell.state.borrow())
    }

    pub fn user(&self) -> Option<User> {
        self.cell.state.borrow().user().cloned()
    }

    pub fn is_authenticated(&self) -> bool {
        self.cell.state.borrow().user().is_some()
    }

    pub fn loading(&self) -> bool {
        self.cell.state.borrow().is_loading()
    }

    /// Receiver that observes every state change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────────

    /// Silently re-establish the session from persisted credentials.
    ///
    /// Runs once per store; later calls return the current session. Failures
    /// are logged, the stored token is discarded and the session continues
    /// anonymously. Loading is always cleared when this returns.
    pub async fn restore(&self) -> Session {
        let started = self.cell.state.send_if_modified(|state| {
            if *state == SessionState::Uninitialized {
                *state = SessionState::Restoring;
                true
            } else {
                false
            }
        });

        if !started {
            tracing::debug!("Session restoration already ran");
            return self.session();
        }

        let guard = RestoreGuard::new(&self.cell);

        let token = match self.cell.credentials.token() {
            Ok(token) => token,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read stored token");
                None
            }
        };

        let next = match token {
            None => {
                // A snapshot without a token is stale
                if let Err(e) = self.cell.credentials.clear() {
                    tracing::warn!(error = %e, "Failed to clear stale credentials");
                }
                SessionState::Anonymous
            }
            Some(token) => match self.confirm(&token).await {
                Ok(user) => {
                    tracing::info!(user_id = %user.id, "Session restored");
                    SessionState::Authenticated(user)
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to get current user");
                    self.discard_token(&token);
                    SessionState::Anonymous
                }
            },
        };

        guard.settle(next);
        self.session()
    }

    /// Confirm a stored token with `/auth/me` and refresh the user snapshot.
    async fn confirm(&self, token: &str) -> Result<User> {
        if self.cell.credentials.is_expired(Utc::now())? {
            return Err(crate::error::ClientError::Unauthorized(Some(
                "Stored token has expired".to_string(),
            )));
        }

        let user = self.api.current_user_with_token(token).await?;

        if let Err(e) = self.cell.credentials.set_user(&user) {
            tracing::warn!(error = %e, "Failed to refresh user snapshot");
        }
        Ok(user)
    }

    /// Clear credentials unless they were replaced meanwhile (a login that
    /// finished while restoration was in flight).
    fn discard_token(&self, token: &str) {
        let current = self.cell.credentials.token().ok().flatten();
        if current.as_deref().is_some_and(|t| t != token) {
            return;
        }
        if let Err(e) = self.cell.credentials.clear() {
            tracing::error!(error = %e, "Failed to discard stored token");
        }
    }

    /// Sign in with email and password.
    ///
    /// On success the token and the confirmed user are persisted together.
    /// On failure nothing is persisted and the error is returned.
    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        let credentials = UserLogin {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.authenticate(&credentials).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Logged in");
                Ok(user)
            }
            Err(e) => {
                tracing::error!(error = %e, "Login failed");
                Err(e)
            }
        }
    }

    async fn authenticate(&self, credentials: &UserLogin) -> Result<User> {
        let token = self.api.login(credentials).await?;
        let user = self.api.current_user_with_token(&token.access_token).await?;

        if let Err(e) = self.cell.credentials.store(&token, &user) {
            // Never leave a token behind without its user
            if let Err(clear_err) = self.cell.credentials.clear() {
                tracing::error!(error = %clear_err, "Failed to clear partially stored credentials");
            }
            return Err(e.into());
        }

        self.cell.set(SessionState::Authenticated(user.clone()));
        Ok(user)
    }

    /// Create an account, then sign in with the same credentials.
    ///
    /// If the account is created but the sign-in fails, the error is returned
    /// and the session stays anonymous; the account exists on the backend.
    pub async fn register(&self, user: &UserCreate) -> Result<User> {
        let created = match self.api.register(user).await {
            Ok(created) => created,
            Err(e) => {
                tracing::error!(error = %e, "Registration failed");
                return Err(e);
            }
        };
        tracing::info!(user_id = %created.id, "Account created");

        self.login(&user.email, &user.password).await
    }

    /// Sign out locally. No network call.
    pub fn logout(&self) {
        if let Err(e) = self.cell.credentials.clear() {
            tracing::error!(error = %e, "Failed to clear stored credentials");
        }
        self.cell.set(SessionState::Anonymous);
        tracing::info!("Logged out");
    }
}
