//! Subtree gating on session state.
//!
//! SYSTEM CONTEXT
//! ==============
//! A guard wraps a protected view: the shell calls [`SessionGuard::evaluate`]
//! on mount and again on every navigation start/complete event, rendering
//! children only on [`GuardDecision::Render`]. The decision is re-derived
//! from scratch on every call — there is no cached "authorized" flag — so a
//! revoked session cannot leak a previously-rendered protected view.

use std::sync::Arc;

use crate::role;
use crate::store::SessionStore;

/// What the shell should do with the guarded subtree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// Render the protected children.
    Render,
    /// Render a loading indicator and nothing else.
    Loading,
    /// Redirect to the login route; do not render children.
    RedirectToLogin,
    /// Authenticated but not allowed here; send to the dashboard.
    RedirectToDashboard,
}

/// Gate for routes that require any authenticated session.
pub struct SessionGuard {
    store: Arc<SessionStore>,
}

impl SessionGuard {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { store }
    }

    /// Derive the current decision from credential + store state.
    ///
    /// No credential (or one too short to trust) redirects immediately. A
    /// credential with the store still resolving yields `Loading`. Once the
    /// store resolves, an absent session clears the credential and
    /// redirects; otherwise the children render.
    #[must_use]
    pub fn evaluate(&self) -> GuardDecision {
        let min_len = self.store.config().min_token_len;
        match self.store.credential() {
            None => GuardDecision::RedirectToLogin,
            Some(token) if token.len() < min_len => GuardDecision::RedirectToLogin,
            Some(_) => {
                let snapshot = self.store.snapshot();
                if snapshot.loading {
                    GuardDecision::Loading
                } else if snapshot.session.is_some() {
                    GuardDecision::Render
                } else {
                    self.store.clear_credential();
                    GuardDecision::RedirectToLogin
                }
            }
        }
    }

    /// Re-derive the decision for a navigation start/complete event.
    #[must_use]
    pub fn on_route_change(&self, path: &str) -> GuardDecision {
        tracing::debug!(path, "guard re-check on navigation");
        self.evaluate()
    }

    /// Wait until the store leaves its loading phase, then decide.
    ///
    /// If the store is dropped while waiting, the guard fails closed.
    pub async fn resolve(&self) -> GuardDecision {
        let mut rx = self.store.subscribe();
        loop {
            let decision = self.evaluate();
            if decision != GuardDecision::Loading {
                return decision;
            }
            if rx.changed().await.is_err() {
                return GuardDecision::RedirectToLogin;
            }
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<SessionStore> {
        &self.store
    }
}

/// Gate for admin-only routes.
///
/// Same gating as [`SessionGuard`], with the extra requirement that the
/// session's role is an admin tier. Authenticated non-admins are sent to the
/// dashboard rather than the login page.
pub struct AdminGuard {
    inner: SessionGuard,
}

impl AdminGuard {
    #[must_use]
    pub fn new(store: Arc<SessionStore>) -> Self {
        Self { inner: SessionGuard::new(store) }
    }

    #[must_use]
    pub fn evaluate(&self) -> GuardDecision {
        match self.inner.evaluate() {
            GuardDecision::Render => {
                let is_admin =
                    role::is_admin_role(self.inner.store().session().map(|s| s.role));
                if is_admin {
                    GuardDecision::Render
                } else {
                    GuardDecision::RedirectToDashboard
                }
            }
            other => other,
        }
    }

    #[must_use]
    pub fn on_route_change(&self, path: &str) -> GuardDecision {
        tracing::debug!(path, "admin guard re-check on navigation");
        self.evaluate()
    }

    /// Wait until the store leaves its loading phase, then decide.
    pub async fn resolve(&self) -> GuardDecision {
        let mut rx = self.inner.store().subscribe();
        loop {
            let decision = self.evaluate();
            if decision != GuardDecision::Loading {
                return decision;
            }
            if rx.changed().await.is_err() {
                return GuardDecision::RedirectToLogin;
            }
        }
    }
}

#[cfg(test)]
#[path = "guard_test.rs"]
mod tests;
