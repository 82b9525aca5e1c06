// ── Core error types ──
//
// The error taxonomy that drives session behavior. The distinction that
// matters: `AuthenticationFailed` is the only signal that discards the
// session; everything after a successful identity check is `Data` and
// leaves the session intact. The `From<tramita_api::Error>` impl therefore
// maps transport failures to `Data` -- only the auth gate, which knows it
// is talking to the identity endpoint, reclassifies into
// `AuthenticationFailed`.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Identity validation failed. The session token has been cleared;
    /// the user must sign in again. Never retried automatically.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    /// A post-auth fetch or mutation failed. The session and identity
    /// remain intact; the user may retry the action manually.
    #[error("Data error: {message}")]
    Data { message: String },

    /// Client-side validation rejected the input before any network call.
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    /// A data operation was attempted without an authenticated session.
    #[error("Not signed in")]
    SignedOut,

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tramita_api::Error> for CoreError {
    fn from(err: tramita_api::Error) -> Self {
        // The message keeps the transport detail (status, raw body) so the
        // surfaced error is debuggable without log access.
        CoreError::Data {
            message: err.to_string(),
        }
    }
}
