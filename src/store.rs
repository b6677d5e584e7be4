//! SessionStore — the single authoritative holder of the current session.
//!
//! ARCHITECTURE
//! ============
//! The store owns the async protocol for establishing and refreshing the
//! session against the backend. State is published through a `tokio::watch`
//! channel so guards and user-aware components can subscribe; the store is an
//! explicit injectable service (construct with [`SessionStore::new`], share
//! behind an `Arc`), not implicit module state.
//!
//! Session lifecycle: `Uninitialized → Checking → {Authenticated,
//! Unauthenticated}`. `Authenticated → Unauthenticated` on logout, 401, or
//! malformed profile data. There is no automatic retry or polling; the
//! checking phase only re-enters on an explicit `check_auth`, `login`, or
//! `register` call.
//!
//! TRADE-OFFS
//! ==========
//! Two interleaved calls race last-write-wins on the session (e.g. a
//! `check_auth` in flight when `logout` lands). Accepted for the single-user,
//! single-tab usage model; multi-tab consistency is out of scope.

use std::sync::Arc;

use tokio::sync::watch;

use crate::api::{ApiError, AuthApi};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::notify::{Notice, Notifier};
use crate::policy::{self, Navigate, Resolution};
use crate::storage::CredentialStore;
use crate::types::{
    LoginRequest, ProfileResponse, ProfileUpdate, RegisterData, RegisterRequest, Session,
};

/// Phase of the session lifecycle state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthPhase {
    /// No check has run yet.
    Uninitialized,
    /// A credential check is in flight.
    Checking,
    /// A fully populated session is live.
    Authenticated,
    /// Definitively logged out.
    Unauthenticated,
}

/// Published view of the store's state.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthSnapshot {
    pub phase: AuthPhase,
    pub session: Option<Session>,
    /// True from mount (or the start of a check) until the check resolves.
    /// Transitions true → false exactly once per `check_auth` call.
    pub loading: bool,
}

impl AuthSnapshot {
    fn initial() -> Self {
        Self { phase: AuthPhase::Uninitialized, session: None, loading: true }
    }
}

/// The injectable session service.
pub struct SessionStore {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn CredentialStore>,
    notifier: Arc<dyn Notifier>,
    config: AuthConfig,
    state: watch::Sender<AuthSnapshot>,
}

impl SessionStore {
    #[must_use]
    pub fn new(
        api: Arc<dyn AuthApi>,
        storage: Arc<dyn CredentialStore>,
        notifier: Arc<dyn Notifier>,
        config: AuthConfig,
    ) -> Self {
        Self {
            api,
            storage,
            notifier,
            config,
            state: watch::Sender::new(AuthSnapshot::initial()),
        }
    }

    /// Subscribe to state changes. Receivers are dropped naturally when the
    /// subscriber goes away; dropping the store closes the channel.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthSnapshot> {
        self.state.subscribe()
    }

    /// Current published state.
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.state.borrow().clone()
    }

    /// Current session, if authenticated.
    #[must_use]
    pub fn session(&self) -> Option<Session> {
        self.state.borrow().session.clone()
    }

    /// Current stored credential. Reads go through the store so the narrow
    /// storage interface stays the single access path.
    #[must_use]
    pub fn credential(&self) -> Option<String> {
        self.storage.token()
    }

    #[must_use]
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub(crate) fn clear_credential(&self) {
        self.storage.clear_token();
    }

    /// Mount-time entry point; alias for [`Self::check_auth`].
    pub async fn init(&self, current_path: &str) -> Option<Navigate> {
        self.check_auth(current_path).await
    }

    /// Validate the persisted credential against the profile endpoint.
    ///
    /// Never fails: every branch terminates in a deterministic state change,
    /// with `loading` ending false. A missing or too-short credential is
    /// resolved locally without a network call, redirecting only when
    /// `current_path` is a protected route. Any remote failure (401,
    /// malformed body, transport error) clears the credential, notifies, and
    /// redirects to login.
    pub async fn check_auth(&self, current_path: &str) -> Option<Navigate> {
        self.state.send_modify(|s| {
            s.phase = AuthPhase::Checking;
            s.loading = true;
        });

        let token = self.storage.token();
        let resolution = match token.as_deref() {
            Some(token) if policy::token_is_trusted(Some(token), self.config.min_token_len) => {
                let outcome = self.api.fetch_profile(token).await;
                if let Err(err) = &outcome {
                    tracing::warn!(error = %err, "profile verification failed");
                }
                policy::resolve_profile(outcome, &self.config)
            }
            _ => {
                tracing::debug!(path = current_path, "no trusted credential");
                policy::resolve_missing_token(current_path, &self.config)
            }
        };
        self.apply(resolution)
    }

    /// Authenticate with an identifier/secret pair.
    ///
    /// On success, persists the credential, derives the session from the
    /// response fields, records the admin marker when the identifier matches
    /// the known administrative address, and returns a full-page navigation
    /// to the dashboard.
    ///
    /// # Errors
    ///
    /// Business failures are pattern-matched into friendlier classes
    /// ([`AuthError::InvalidCredentials`], [`AuthError::AccountNotFound`]),
    /// notified, and re-thrown so the calling form can stop its own loading
    /// state without duplicating the notification.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Navigate, AuthError> {
        let request = LoginRequest {
            username_or_email: identifier.to_string(),
            password: secret.to_string(),
        };
        match self.api.login(&request).await {
            Ok(response) => {
                self.storage.set_token(&response.access_token);
                if policy::is_admin_identifier(&response.email, &self.config) {
                    self.storage.set_admin_marker(&response.email);
                }
                let session = policy::session_from_login(&response, policy::now_rfc3339());
                tracing::debug!(user = %session.id, "login succeeded");
                self.state.send_replace(AuthSnapshot {
                    phase: AuthPhase::Authenticated,
                    session: Some(session),
                    loading: false,
                });
                self.notifier.notify(Notice::success("Login successful!"));
                Ok(Navigate::full_load(&self.config.dashboard_route))
            }
            Err(err) => {
                let error = match err {
                    ApiError::Status { message, .. } => policy::classify_login_failure(&message),
                    ApiError::Unauthorized => AuthError::InvalidCredentials,
                    ApiError::Network(_) | ApiError::Decode(_) => AuthError::Network,
                };
                self.notifier.notify(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Register a new account with a normalized payload.
    ///
    /// A response carrying a credential behaves like a successful login and
    /// navigates to the dashboard; without one, registration is treated as
    /// "pending manual login" and navigates to the login page.
    ///
    /// # Errors
    ///
    /// Failures are notified (server messages verbatim) and re-thrown.
    pub async fn register(&self, data: RegisterData) -> Result<Navigate, AuthError> {
        let request = RegisterRequest::from_data(data);
        match self.api.register(&request).await {
            Ok(response) => {
                let navigate = policy::resolve_register_navigation(&response, &self.config);
                if let Some(token) = &response.access_token {
                    self.storage.set_token(token);
                    let session = response.user.clone().and_then(ProfileResponse::into_session);
                    let phase = if session.is_some() {
                        AuthPhase::Authenticated
                    } else {
                        AuthPhase::Unauthenticated
                    };
                    self.state
                        .send_replace(AuthSnapshot { phase, session, loading: false });
                    self.notifier
                        .notify(Notice::success("Registration successful!"));
                } else {
                    self.notifier
                        .notify(Notice::success("Registration successful! Please log in."));
                }
                Ok(navigate)
            }
            Err(err) => {
                let error = policy::classify_register_failure(&err);
                self.notifier.notify(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Synchronously clear the credential and session.
    ///
    /// The admin marker is left in place; only the token key is removed, so
    /// login followed by logout leaves exactly what login wrote besides the
    /// token untouched.
    pub fn logout(&self) -> Navigate {
        self.storage.clear_token();
        self.state.send_replace(AuthSnapshot {
            phase: AuthPhase::Unauthenticated,
            session: None,
            loading: false,
        });
        self.notifier.notify(Notice::success("Logged out successfully"));
        Navigate::push(&self.config.login_route)
    }

    /// `PUT` a partial profile update and replace the session with the
    /// response.
    ///
    /// # Errors
    ///
    /// Notified and re-thrown; a 401 maps to [`AuthError::SessionExpired`],
    /// a malformed response body to [`AuthError::InvalidUserData`].
    pub async fn update_profile(&self, patch: &ProfileUpdate) -> Result<Session, AuthError> {
        let Some(token) = self.storage.token() else {
            let error = AuthError::MissingToken;
            self.notifier.notify(Notice::error(error.to_string()));
            return Err(error);
        };
        match self.api.update_profile(&token, patch).await {
            Ok(body) => match body.into_session() {
                Some(session) => {
                    self.state.send_replace(AuthSnapshot {
                        phase: AuthPhase::Authenticated,
                        session: Some(session.clone()),
                        loading: false,
                    });
                    self.notifier
                        .notify(Notice::success("Profile updated successfully"));
                    Ok(session)
                }
                None => {
                    let error = AuthError::InvalidUserData;
                    self.notifier.notify(Notice::error(error.to_string()));
                    Err(error)
                }
            },
            Err(err) => {
                let error = match err {
                    ApiError::Unauthorized => AuthError::SessionExpired,
                    ApiError::Status { message, .. } if !message.is_empty() => {
                        AuthError::Server(message)
                    }
                    ApiError::Status { .. } => AuthError::Server("Profile update failed".into()),
                    ApiError::Network(_) | ApiError::Decode(_) => AuthError::Network,
                };
                self.notifier.notify(Notice::error(error.to_string()));
                Err(error)
            }
        }
    }

    /// Apply a computed resolution: storage effect, state publish, notice.
    /// Returns the navigation intent for the shell.
    fn apply(&self, resolution: Resolution) -> Option<Navigate> {
        if resolution.clear_token {
            self.storage.clear_token();
        }
        let phase = if resolution.session.is_some() {
            AuthPhase::Authenticated
        } else {
            AuthPhase::Unauthenticated
        };
        self.state.send_replace(AuthSnapshot {
            phase,
            session: resolution.session,
            loading: false,
        });
        if let Some(notice) = resolution.notice {
            self.notifier.notify(notice);
        }
        resolution.navigate
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
