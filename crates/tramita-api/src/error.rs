use thiserror::Error;

/// Top-level error type for the `tramita-api` crate.
///
/// Covers every failure mode at the transport boundary. Callers classify:
/// an HTTP 401/403 from the identity endpoint means re-login, anything
/// else is a data failure. `tramita-core` performs that classification --
/// this crate only reports what happened, keeping the raw response body
/// so the surfaced message is debuggable.
#[derive(Debug, Error)]
pub enum Error {
    /// Non-success HTTP status. Carries the raw body text so callers can
    /// show the backend's own detail message.
    #[error("HTTP {status} {status_text}: {body}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// A typed decode failed, with the raw payload for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}

impl Error {
    /// Returns `true` if the server explicitly rejected the credential
    /// (HTTP 401 or 403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401 | 403, .. })
    }

    /// Returns `true` if this is a "not found" response.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Http { status: 404, .. } => true,
            Self::Transport(e) => e.status() == Some(reqwest::StatusCode::NOT_FOUND),
            _ => false,
        }
    }
}
