//! Credential storage behind a single narrow interface.
//!
//! DESIGN
//! ======
//! The persisted bearer token is the one piece of cross-component shared
//! mutable state, so every reader goes through [`CredentialStore`] rather
//! than touching a storage backend directly. The store also holds the
//! administrative-email marker, written only when the login identifier
//! matches the known admin address.

use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

/// Storage key for the bearer credential.
pub const TOKEN_KEY: &str = "token";
/// Storage key for the administrative-email marker.
pub const ADMIN_EMAIL_KEY: &str = "adminEmail";

/// Narrow access interface for the persisted credential and admin marker.
///
/// Implementations backed by keyed storage (browser local storage, a keychain)
/// must persist under [`TOKEN_KEY`] and [`ADMIN_EMAIL_KEY`] so sessions
/// survive a swap between backends.
pub trait CredentialStore: Send + Sync {
    /// Current bearer token, if any.
    fn token(&self) -> Option<String>;
    /// Persist the bearer token.
    fn set_token(&self, token: &str);
    /// Remove the bearer token. Leaves the admin marker in place.
    fn clear_token(&self);
    /// Current administrative-email marker, if any.
    fn admin_marker(&self) -> Option<String>;
    /// Persist the administrative-email marker.
    fn set_admin_marker(&self, email: &str);
}

/// In-process credential store, keyed like a browser storage backend.
///
/// Suitable both as the production backend for shells that keep credentials
/// in memory for the lifetime of the page, and as the storage double in
/// tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slots: Mutex<HashMap<&'static str, String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn slots(&self) -> std::sync::MutexGuard<'_, HashMap<&'static str, String>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.slots().get(TOKEN_KEY).cloned()
    }

    fn set_token(&self, token: &str) {
        self.slots().insert(TOKEN_KEY, token.to_string());
    }

    fn clear_token(&self) {
        self.slots().remove(TOKEN_KEY);
    }

    fn admin_marker(&self) -> Option<String> {
        self.slots().get(ADMIN_EMAIL_KEY).cloned()
    }

    fn set_admin_marker(&self, email: &str) {
        self.slots().insert(ADMIN_EMAIL_KEY, email.to_string());
    }
}

#[cfg(test)]
#[path = "storage_test.rs"]
mod tests;
