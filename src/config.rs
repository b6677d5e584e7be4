//! Auth configuration — endpoints, client routes, and trust thresholds.

use std::env;

/// Tokens shorter than this are treated as malformed without a network call.
pub const MIN_TOKEN_LEN: usize = 10;

/// Client routes that require an authenticated session.
pub const PROTECTED_ROUTES: [&str; 7] = [
    "/dashboard",
    "/energy",
    "/analytics",
    "/devices",
    "/billing",
    "/profile",
    "/partner-services",
];

/// Configuration for the auth/session subsystem.
///
/// Endpoint paths are joined onto `base_url`; route paths are client-side
/// locations handed back to the shell as navigation intents.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// `GET`/`PUT` profile endpoint path.
    pub profile_path: String,
    /// `POST` login endpoint path.
    pub login_path: String,
    /// `POST` registration endpoint path.
    pub register_path: String,
    /// `GET` feature-flag catalog path.
    pub features_path: String,
    /// `GET` per-user entitlement path prefix; the user id is appended.
    pub user_access_path: String,
    /// Client route for the login screen.
    pub login_route: String,
    /// Client route for the landing dashboard.
    pub dashboard_route: String,
    /// Client routes that require an authenticated session.
    pub protected_routes: Vec<String>,
    /// Minimum credential length considered worth verifying remotely.
    pub min_token_len: usize,
    /// Login identifier that triggers the administrative-email marker.
    pub admin_email: String,
}

impl AuthConfig {
    /// Build a config with production defaults against the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            profile_path: "/users/profile".into(),
            login_path: "/users/login".into(),
            register_path: "/users/register".into(),
            features_path: "/features".into(),
            user_access_path: "/user-access".into(),
            login_route: "/login".into(),
            dashboard_route: "/dashboard".into(),
            protected_routes: PROTECTED_ROUTES.iter().map(|r| (*r).to_string()).collect(),
            min_token_len: MIN_TOKEN_LEN,
            admin_email: "admin@smartwatts.ng".into(),
        }
    }

    /// Load from `SMARTWATTS_API_URL`. Returns `None` if unset.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("SMARTWATTS_API_URL").ok()?;
        Some(Self::new(base_url))
    }

    /// Whether the given client route requires an authenticated session.
    #[must_use]
    pub fn is_protected(&self, path: &str) -> bool {
        self.protected_routes.iter().any(|r| r == path)
    }

    /// Full URL for an endpoint path.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
