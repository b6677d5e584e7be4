//! SmartWatts client auth/session core.
//!
//! ARCHITECTURE
//! ============
//! This crate is the authentication and feature-gating core of the SmartWatts
//! energy-monitoring client, kept UI-framework agnostic so shell crates can
//! consume it directly:
//!
//! - [`store::SessionStore`] — the single authoritative holder of the current
//!   [`types::Session`] plus the async protocol for establishing it.
//! - [`guard::SessionGuard`] / [`guard::AdminGuard`] — gate rendering of a
//!   protected subtree on store state and emit redirect decisions.
//! - [`features`] — the pure role/feature policy layer plus best-effort
//!   entitlement loaders.
//!
//! Every externally-triggered auth failure converges on the same terminal
//! state (credential cleared, session absent, redirect to login), so callers
//! never observe a partially-authenticated state.
//!
//! SIDE EFFECTS
//! ============
//! The core decision logic lives in [`policy`] as pure functions; the store
//! applies the resulting state changes and returns navigation intents as
//! values. Actually moving the browser/window is the embedding shell's job.

pub mod api;
pub mod config;
pub mod error;
pub mod features;
pub mod guard;
pub mod notify;
pub mod policy;
pub mod role;
pub mod storage;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use api::{AuthApi, HttpAuthApi};
pub use config::AuthConfig;
pub use error::AuthError;
pub use guard::{AdminGuard, GuardDecision, SessionGuard};
pub use notify::{Notice, Notifier};
pub use policy::{Navigate, NavigateMode};
pub use role::Role;
pub use storage::{CredentialStore, MemoryCredentialStore};
pub use store::{AuthPhase, AuthSnapshot, SessionStore};
pub use types::Session;
