// ── Admin-user endpoint negotiation ──
//
// The backend exposes admin-user management under one of several candidate
// paths depending on deployment. The shape is negotiated once per session
// by probing the candidates in order and memoizing the winner; exhausting
// every candidate falls back to the default so the subsequent real call
// fails as an ordinary data error rather than failing the probe itself.

use serde_json::Value;
use tokio::sync::OnceCell;
use tracing::debug;

use tramita_api::ApiClient;
use tramita_api::endpoints::usuarios::USUARIOS_CANDIDATES;
use tramita_api::models::Row;

use crate::error::CoreError;

#[derive(Debug, Default)]
pub struct UsersApi {
    endpoint: OnceCell<&'static str>,
}

impl UsersApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// The negotiated endpoint, probing on first use.
    pub async fn endpoint(&self, client: &ApiClient) -> &'static str {
        *self
            .endpoint
            .get_or_init(|| async {
                for candidate in USUARIOS_CANDIDATES {
                    if client.probe(candidate).await {
                        debug!(endpoint = candidate, "admin-user endpoint negotiated");
                        return *candidate;
                    }
                }
                debug!("admin-user probe exhausted; using default candidate");
                USUARIOS_CANDIDATES[0]
            })
            .await
    }

    pub async fn list(&self, client: &ApiClient) -> Result<Vec<Row>, CoreError> {
        let endpoint = self.endpoint(client).await;
        Ok(client.list_usuarios(endpoint).await?)
    }

    pub async fn create(&self, client: &ApiClient, payload: &Value) -> Result<Value, CoreError> {
        let endpoint = self.endpoint(client).await;
        Ok(client.create_usuario(endpoint, payload).await?)
    }

    pub async fn update(&self, client: &ApiClient, payload: &Value) -> Result<Value, CoreError> {
        let endpoint = self.endpoint(client).await;
        Ok(client.update_usuario(endpoint, payload).await?)
    }
}
