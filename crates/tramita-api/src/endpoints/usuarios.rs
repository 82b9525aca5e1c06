// Admin user management endpoints
//
// The backend exposes the admin-user API under one of several candidate
// paths depending on deployment. These methods take the already-negotiated
// endpoint; the once-per-session probing and memoization live in
// `tramita-core`.

use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::normalize_rows;
use crate::error::Error;
use crate::models::Row;

/// Candidate admin-user API paths, in probe order. The first is also the
/// fallback when probing exhausts all candidates.
pub const USUARIOS_CANDIDATES: &[&str] = &["/usuarios", "/usuarios/roles"];

impl ApiClient {
    /// List admin users under the negotiated endpoint.
    pub async fn list_usuarios(&self, endpoint: &str) -> Result<Vec<Row>, Error> {
        let resp: Value = self.get_value(endpoint, &[]).await?;
        Ok(normalize_rows(&resp))
    }

    /// Create an admin user. The payload shape follows the negotiated
    /// endpoint, so it stays loose.
    pub async fn create_usuario(&self, endpoint: &str, payload: &Value) -> Result<Value, Error> {
        self.post_json(endpoint, payload).await
    }

    /// Update an admin user.
    pub async fn update_usuario(&self, endpoint: &str, payload: &Value) -> Result<Value, Error> {
        self.put_json(endpoint, payload).await
    }
}
