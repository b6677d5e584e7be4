//! Pure auth decision layer.
//!
//! DESIGN
//! ======
//! `check_auth` conceptually both computes new session state and moves the
//! browser. Those concerns are split here: every function maps inputs to a
//! [`Resolution`] value describing the state change, the storage effect, the
//! navigation intent, and the notice to show. The store applies resolutions;
//! the shell executes navigation. Nothing in this module performs I/O.

use crate::api::ApiError;
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::notify::Notice;
use crate::types::{LoginResponse, ProfileResponse, RegisterResponse, Session};

/// How the shell should move to the target path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigateMode {
    /// Client-side route transition.
    Push,
    /// Full-page load. Guarantees a fresh store initialization cycle on the
    /// next page, which is why login lands on the dashboard this way.
    FullLoad,
}

/// A navigation intent returned to the shell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Navigate {
    pub path: String,
    pub mode: NavigateMode,
}

impl Navigate {
    #[must_use]
    pub fn push(path: impl Into<String>) -> Self {
        Self { path: path.into(), mode: NavigateMode::Push }
    }

    #[must_use]
    pub fn full_load(path: impl Into<String>) -> Self {
        Self { path: path.into(), mode: NavigateMode::FullLoad }
    }
}

/// Computed outcome of a credential check: the new session state plus the
/// effects the caller must apply.
#[derive(Clone, Debug, PartialEq)]
pub struct Resolution {
    pub session: Option<Session>,
    pub clear_token: bool,
    pub navigate: Option<Navigate>,
    pub notice: Option<Notice>,
}

impl Resolution {
    /// Terminal failure state: credential cleared, session absent, redirect
    /// to login with a user-visible notice.
    fn failed(error: &AuthError, config: &AuthConfig) -> Self {
        Self {
            session: None,
            clear_token: true,
            navigate: Some(Navigate::push(&config.login_route)),
            notice: Some(Notice::error(error.to_string())),
        }
    }
}

/// Whether a stored credential is worth verifying remotely.
#[must_use]
pub fn token_is_trusted(token: Option<&str>, min_len: usize) -> bool {
    token.is_some_and(|t| t.len() >= min_len)
}

/// Resolve a check that found no usable credential.
///
/// Treated identically to "never logged in": silent, and only redirects when
/// the current location is a protected route.
#[must_use]
pub fn resolve_missing_token(current_path: &str, config: &AuthConfig) -> Resolution {
    let navigate = config
        .is_protected(current_path)
        .then(|| Navigate::push(&config.login_route));
    Resolution { session: None, clear_token: true, navigate, notice: None }
}

/// Resolve the profile round trip performed for a presumed-valid credential.
///
/// Every failure branch converges on the same terminal state so the rest of
/// the application never reasons about partially-authenticated sessions.
#[must_use]
pub fn resolve_profile(
    outcome: Result<ProfileResponse, ApiError>,
    config: &AuthConfig,
) -> Resolution {
    match outcome {
        Ok(body) => match body.into_session() {
            Some(session) => Resolution {
                session: Some(session),
                clear_token: false,
                navigate: None,
                notice: None,
            },
            None => Resolution::failed(&AuthError::InvalidUserData, config),
        },
        Err(ApiError::Unauthorized) => Resolution::failed(&AuthError::SessionExpired, config),
        Err(ApiError::Status { .. }) => Resolution::failed(&AuthError::AuthFailed, config),
        Err(ApiError::Decode(_)) => Resolution::failed(&AuthError::InvalidUserData, config),
        Err(ApiError::Network(_)) => Resolution::failed(&AuthError::Network, config),
    }
}

/// Map a login business-failure message to a friendlier error class.
///
/// Unmatched messages are surfaced verbatim.
#[must_use]
pub fn classify_login_failure(message: &str) -> AuthError {
    let lower = message.to_lowercase();
    if lower.contains("invalid credentials")
        || lower.contains("bad credentials")
        || lower.contains("invalid password")
    {
        return AuthError::InvalidCredentials;
    }
    if lower.contains("not found") || lower.contains("no user") || lower.contains("does not exist")
    {
        return AuthError::AccountNotFound;
    }
    if message.is_empty() {
        return AuthError::Server("Login failed".into());
    }
    AuthError::Server(message.to_string())
}

/// Map a registration business failure; messages are surfaced verbatim.
#[must_use]
pub fn classify_register_failure(error: &ApiError) -> AuthError {
    match error {
        ApiError::Status { message, .. } if !message.is_empty() => {
            AuthError::Server(message.clone())
        }
        ApiError::Status { .. } | ApiError::Decode(_) => {
            AuthError::Server("Registration failed".into())
        }
        ApiError::Unauthorized | ApiError::Network(_) => AuthError::Network,
    }
}

/// Derive a [`Session`] from the login response's server-side naming.
///
/// The login endpoint has no name fields, so the first name falls back to
/// the username (or its local-part when the username is an email address).
#[must_use]
pub fn session_from_login(response: &LoginResponse, created_at: String) -> Session {
    let first_name = response
        .username
        .split('@')
        .next()
        .unwrap_or(&response.username)
        .to_string();
    Session {
        id: response.user_id.clone(),
        email: response.email.clone(),
        first_name,
        last_name: String::new(),
        role: response.role,
        is_active: response.active,
        created_at,
        location: None,
    }
}

/// Whether the login identifier should persist the administrative marker.
#[must_use]
pub fn is_admin_identifier(email: &str, config: &AuthConfig) -> bool {
    email == config.admin_email
}

/// Post-registration navigation: a token means the session is live and lands
/// on the dashboard; no token means "pending manual login".
#[must_use]
pub fn resolve_register_navigation(response: &RegisterResponse, config: &AuthConfig) -> Navigate {
    if response.access_token.is_some() {
        Navigate::push(&config.dashboard_route)
    } else {
        Navigate::push(&config.login_route)
    }
}

/// Current time formatted for the session's `created_at` field.
#[must_use]
pub(crate) fn now_rfc3339() -> String {
    time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "policy_test.rs"]
mod tests;
