//! Auth failure taxonomy.
//!
//! Display strings double as the user-visible notification text, so they are
//! written as short human-readable sentences rather than error codes.

/// Failure classes surfaced by the session subsystem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// The backend rejected the credential with HTTP 401.
    #[error("Session expired. Please log in again.")]
    SessionExpired,
    /// The profile body was missing required identity fields.
    #[error("Invalid user data. Please log in again.")]
    InvalidUserData,
    /// The profile endpoint failed with a non-401 status.
    #[error("Authentication failed. Please log in again.")]
    AuthFailed,
    /// Transport-level failure while talking to the backend.
    #[error("Authentication error. Please log in again.")]
    Network,
    /// Login rejected: bad email/password combination.
    #[error("Invalid email or password.")]
    InvalidCredentials,
    /// Login rejected: no principal matches the identifier.
    #[error("No account found for that email address.")]
    AccountNotFound,
    /// Server-provided business failure, surfaced verbatim.
    #[error("{0}")]
    Server(String),
    /// An operation that needs a credential found none in storage.
    #[error("You are not logged in.")]
    MissingToken,
}
