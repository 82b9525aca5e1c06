// Session token persistence and the identity-provider seam.

use std::future::Future;
use std::sync::Mutex;

use secrecy::SecretString;

use crate::error::CoreError;

/// Persistence for the bearer token across process restarts within one
/// login session.
///
/// The browser original scopes this to the tab (a reload restores the
/// session, a fresh tab does not). Embedders pick the equivalent scope:
/// the CLI uses a state file, tests use [`MemoryStore`].
///
/// A stored token is never trusted blindly -- the gate re-validates it
/// against the identity endpoint before any role-gated operation.
pub trait SessionStore: Send + Sync {
    /// Persist the token, or remove the persisted value entirely when
    /// `None`. An empty string is treated as `None`: an empty-string
    /// placeholder is never persisted.
    fn save(&self, token: Option<&str>);

    /// Read the persisted token, if any.
    fn read(&self) -> Option<String>;
}

/// In-memory store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    token: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a token (session-restore tests).
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store.save(Some(token));
        store
    }
}

impl SessionStore for MemoryStore {
    fn save(&self, token: Option<&str>) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = token.filter(|t| !t.is_empty()).map(str::to_owned);
        }
    }

    fn read(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }
}

/// External identity provider: the thing that turns a user gesture into a
/// credential token. The auth gate consumes only the resulting opaque
/// token; button rendering and credential issuance are the provider's
/// business.
pub trait IdentityProvider {
    /// Obtain a fresh credential token (one notification per user action).
    fn sign_in(&self) -> impl Future<Output = Result<SecretString, CoreError>> + Send;

    /// Notified on logout so the provider can drop any silent-reauth state.
    fn sign_out(&self) {}
}

/// Provider backed by an already-issued token (CLI flag, env var, tests).
pub struct StaticTokenProvider {
    token: SecretString,
}

impl StaticTokenProvider {
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }
}

impl IdentityProvider for StaticTokenProvider {
    async fn sign_in(&self) -> Result<SecretString, CoreError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_none_removes_the_value() {
        let store = MemoryStore::new();
        store.save(Some("tok"));
        assert_eq!(store.read().as_deref(), Some("tok"));
        store.save(None);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn empty_string_is_never_persisted() {
        let store = MemoryStore::new();
        store.save(Some(""));
        assert_eq!(store.read(), None);
    }
}
