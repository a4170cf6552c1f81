//! Error taxonomy for account, session and playlist operations.

use thiserror::Error;

/// Errors reported by the account directory, the session gate and the
/// playlist store.
///
/// All of them are recoverable: the CLI reports them inline and carries on.
/// Remote lookup failures never show up here, the lookup client downgrades
/// them to an empty result (see [`crate::audiodb::LookupError`]).
#[derive(Error, Debug)]
pub enum PlaylistError {
    /// Registration with an email that already has an account
    #[error("an account with this email already exists")]
    DuplicateEmail,

    /// Unknown email or wrong password
    #[error("invalid email or password")]
    InvalidCredentials,

    /// Email does not look like `local@domain.tld`
    #[error("invalid email address")]
    InvalidEmail,

    /// Password shorter than the minimum length
    #[error("password must be at least 6 characters")]
    InvalidPassword,

    /// Playlist, track or owning account does not exist for this caller
    #[error("{0} not found")]
    NotFound(String),

    /// Rejected field value, e.g. an empty playlist name
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A protected operation was attempted without an active session
    #[error("not logged in")]
    Unauthenticated,

    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),
}

/// Result type for account, session and playlist operations.
pub type Result<T> = std::result::Result<T, PlaylistError>;
