// ── Console: the session-gated application controller ──
//
// Owns the flow signed_out -> validating -> loading -> ready. Two rules
// carry the whole design:
//
//   1. No data endpoint is called before the identity check for the
//      current sign-in/restore cycle resolves. Enforced by sequencing --
//      each step awaits the previous one -- not by locking.
//   2. A failure of the identity check is an authentication failure: the
//      token is cleared and the session ends. A failure *after* a
//      successful identity check is a data failure: the session stays
//      authenticated and the user retries manually. Neither kind is ever
//      reclassified as the other.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};
use tokio::sync::{Mutex, watch};
use tracing::{debug, info, warn};

use tramita_api::ApiClient;
use tramita_api::models::{CambioEstado, Evento, Identity, Row};

use crate::catalogs::Catalogs;
use crate::error::CoreError;
use crate::gestiones::{GestionDraft, validate_cambio};
use crate::list::ListState;
use crate::session::{IdentityProvider, SessionStore};
use crate::users::UsersApi;

/// Roles allowed to see the admin-user view, compared case-insensitively.
const ADMIN_ROLES: &[&str] = &["admin"];

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    SignedOut,
    /// Token persisted, identity check in flight. The UI shows only a
    /// transitional message, so no second bootstrap can start.
    Validating,
    /// Identity proven; catalogs and the first page are loading.
    LoadingData,
    /// Fully bootstrapped, or authenticated with a surfaced data error.
    Ready,
}

/// The main entry point for consumers. Cheaply cloneable.
#[derive(Clone)]
pub struct Console {
    inner: Arc<ConsoleInner>,
}

struct ConsoleInner {
    client: ApiClient,
    store: Box<dyn SessionStore>,
    state: watch::Sender<SessionState>,
    identity: RwLock<Option<Identity>>,
    catalogs: Mutex<Option<Arc<Catalogs>>>,
    list: Mutex<ListState>,
    users: UsersApi,
}

impl Console {
    pub fn new(client: ApiClient, store: Box<dyn SessionStore>) -> Self {
        let (state, _) = watch::channel(SessionState::SignedOut);
        Self {
            inner: Arc::new(ConsoleInner {
                client,
                store,
                state,
                identity: RwLock::new(None),
                catalogs: Mutex::new(None),
                list: Mutex::new(ListState::default()),
                users: UsersApi::new(),
            }),
        }
    }

    /// The underlying API client.
    pub fn client(&self) -> &ApiClient {
        &self.inner.client
    }

    /// Subscribe to session state changes.
    pub fn state(&self) -> watch::Receiver<SessionState> {
        self.inner.state.subscribe()
    }

    fn set_state(&self, state: SessionState) {
        // send_replace updates the value even with no receiver subscribed;
        // a consumer that subscribes later must still see the current state.
        let _ = self.inner.state.send_replace(state);
    }

    // ── Identity ─────────────────────────────────────────────────────

    /// The validated identity for this session, if signed in.
    pub fn identity(&self) -> Option<Identity> {
        self.inner.identity.read().ok().and_then(|id| id.clone())
    }

    /// Case-insensitive role check against the validated identity.
    pub fn has_role(&self, roles: &[&str]) -> bool {
        self.identity()
            .and_then(|id| id.rol)
            .is_some_and(|rol| roles.iter().any(|r| rol.eq_ignore_ascii_case(r)))
    }

    /// Whether the admin-only view is available to this identity.
    pub fn is_admin(&self) -> bool {
        self.has_role(ADMIN_ROLES)
    }

    // ── Sign-in / restore / sign-out ─────────────────────────────────

    /// Sign in with a freshly issued credential token.
    ///
    /// The token is persisted *before* validation so requests issued
    /// during validation already carry it. On identity failure the token
    /// is cleared and [`CoreError::AuthenticationFailed`] is returned; on
    /// a post-auth data failure the session stays authenticated and
    /// [`CoreError::Data`] is returned for the caller to surface.
    pub async fn sign_in(&self, token: SecretString) -> Result<(), CoreError> {
        self.inner.store.save(Some(token.expose_secret()));
        self.inner.client.set_token(token);
        self.set_state(SessionState::Validating);

        let identity = match self.inner.client.me().await {
            Ok(identity) => identity,
            Err(e) => {
                // Any identity-check failure -- 401/403, network, anything
                // -- means the session cannot be trusted.
                self.clear_session();
                return Err(CoreError::AuthenticationFailed {
                    message: format!("no autorizado o error de autenticaci\u{f3}n: {e}"),
                });
            }
        };

        info!(rol = identity.rol.as_deref().unwrap_or(""), "identity validated");
        if let Ok(mut slot) = self.inner.identity.write() {
            *slot = Some(identity);
        }
        self.set_state(SessionState::LoadingData);

        let boot = self.boot_data().await;
        // Identity is already proven: a boot failure leaves the session
        // authenticated but degraded.
        self.set_state(SessionState::Ready);
        boot
    }

    /// Sign in through an identity provider (external credential issuer).
    pub async fn sign_in_via<P: IdentityProvider>(&self, provider: &P) -> Result<(), CoreError> {
        let token = provider.sign_in().await?;
        self.sign_in(token).await
    }

    /// Attempt silent session restoration from the persisted token.
    ///
    /// Returns `Ok(false)` when no token is stored. A stored token is
    /// never trusted blindly: it goes through the same identity check as
    /// a fresh sign-in.
    pub async fn restore(&self) -> Result<bool, CoreError> {
        let Some(token) = self.inner.store.read() else {
            debug!("no persisted token; staying signed out");
            return Ok(false);
        };
        self.sign_in(SecretString::from(token)).await?;
        Ok(true)
    }

    /// End the session: clear token, identity, caches, and listing state.
    pub async fn sign_out(&self) {
        self.clear_session();
        self.inner.catalogs.lock().await.take();
        self.inner.list.lock().await.reset();
        debug!("signed out");
    }

    /// Sign out and notify the provider so it can drop any silent-reauth
    /// state before a fresh sign-in.
    pub async fn sign_out_via<P: IdentityProvider>(&self, provider: &P) {
        self.sign_out().await;
        provider.sign_out();
    }

    fn clear_session(&self) {
        self.inner.store.save(None);
        self.inner.client.clear_token();
        if let Ok(mut slot) = self.inner.identity.write() {
            *slot = None;
        }
        self.set_state(SessionState::SignedOut);
    }

    fn require_session(&self) -> Result<(), CoreError> {
        if self.identity().is_some() {
            Ok(())
        } else {
            Err(CoreError::SignedOut)
        }
    }

    // ── Data bootstrap ───────────────────────────────────────────────

    /// Catalogs plus the first record page. Only runs after a successful
    /// identity check; failures here are data errors.
    async fn boot_data(&self) -> Result<(), CoreError> {
        let catalogs = Arc::new(Catalogs::load_all(&self.inner.client).await?);
        *self.inner.catalogs.lock().await = Some(catalogs);

        self.refresh_gestiones().await?;
        Ok(())
    }

    /// The per-session catalog cache.
    pub async fn catalogs(&self) -> Result<Arc<Catalogs>, CoreError> {
        self.inner
            .catalogs
            .lock()
            .await
            .clone()
            .ok_or(CoreError::SignedOut)
    }

    /// Memoized department -> localities lookup.
    pub async fn localities_for(&self, departamento: &str) -> Result<Arc<Vec<String>>, CoreError> {
        let catalogs = self.catalogs().await?;
        catalogs
            .localities_for(&self.inner.client, departamento)
            .await
    }

    // ── Record listing ───────────────────────────────────────────────

    /// Inspect or mutate the listing state (filters, cursor, page search).
    pub async fn edit_list<R>(&self, f: impl FnOnce(&mut ListState) -> R) -> R {
        let mut list = self.inner.list.lock().await;
        f(&mut list)
    }

    /// Fetch the current page and return the visible rows.
    ///
    /// The listing lock is not held across the network call; a completion
    /// superseded by a newer fetch is discarded, and the newer fetch's
    /// rows are returned instead.
    pub async fn refresh_gestiones(&self) -> Result<Vec<Row>, CoreError> {
        self.require_session()?;

        let (query, seq) = self.inner.list.lock().await.begin_fetch();
        let (rows, page) = self
            .inner
            .client
            .list_gestiones(&query)
            .await
            .map_err(|e| CoreError::Data {
                message: format!("fall\u{f3} la carga de gestiones: {e}"),
            })?;

        let mut list = self.inner.list.lock().await;
        if !list.apply(seq, rows, page) {
            warn!(seq, "list fetch superseded before completion");
        }
        Ok(list.visible_rows())
    }

    // ── Record operations ────────────────────────────────────────────

    /// One gestion as a loose row.
    pub async fn gestion(&self, id: &str) -> Result<Row, CoreError> {
        self.require_session()?;
        Ok(self.inner.client.get_gestion(id).await?)
    }

    /// Event history, newest first.
    pub async fn eventos(&self, id: &str) -> Result<Vec<Evento>, CoreError> {
        self.require_session()?;
        let mut eventos = self.inner.client.list_eventos(id).await?;
        eventos.sort_by(|a, b| b.fecha_evento.cmp(&a.fecha_evento));
        Ok(eventos)
    }

    /// Validate and create a gestion; returns the server-assigned id.
    ///
    /// The department/locality pair is checked against the geo catalog
    /// before the create call, mirroring the backend's own check.
    pub async fn create_gestion(&self, draft: &GestionDraft) -> Result<String, CoreError> {
        self.require_session()?;
        let payload = draft.validate()?;

        self.inner
            .client
            .validate_geo(&payload.departamento, &payload.localidad)
            .await?;

        let created = self.inner.client.create_gestion(&payload).await?;
        info!(id = %created.id_gestion, "gestion created");
        Ok(created.id_gestion)
    }

    /// Validate and submit a state change.
    pub async fn change_state(&self, id: &str, cambio: &CambioEstado) -> Result<(), CoreError> {
        self.require_session()?;
        validate_cambio(cambio)?;
        Ok(self.inner.client.cambiar_estado(id, cambio).await?)
    }

    /// Soft-delete a gestion.
    pub async fn delete_gestion(&self, id: &str) -> Result<(), CoreError> {
        self.require_session()?;
        Ok(self.inner.client.delete_gestion(id).await?)
    }

    // ── Admin users ──────────────────────────────────────────────────

    /// List admin users over the negotiated endpoint shape.
    pub async fn usuarios(&self) -> Result<Vec<Row>, CoreError> {
        self.require_session()?;
        self.inner.users.list(&self.inner.client).await
    }

    pub async fn create_usuario(&self, payload: &serde_json::Value) -> Result<serde_json::Value, CoreError> {
        self.require_session()?;
        self.inner.users.create(&self.inner.client, payload).await
    }

    pub async fn update_usuario(&self, payload: &serde_json::Value) -> Result<serde_json::Value, CoreError> {
        self.require_session()?;
        self.inner.users.update(&self.inner.client, payload).await
    }
}
