// Gestion record endpoints

use serde_json::Value;

use crate::client::ApiClient;
use crate::envelope::{PageInfo, normalize_rows};
use crate::error::Error;
use crate::models::{CambioEstado, CreatedGestion, Evento, GestionCreate, ListQuery, Row};

impl ApiClient {
    /// Fetch one page of gestiones.
    ///
    /// The raw envelope is normalized into a uniform row list here; the
    /// server's pagination bookkeeping (when present) rides along.
    pub async fn list_gestiones(&self, query: &ListQuery) -> Result<(Vec<Row>, PageInfo), Error> {
        let resp: Value = self.get_value("/gestiones", &query.pairs()).await?;
        Ok((normalize_rows(&resp), PageInfo::from_envelope(&resp)))
    }

    /// Fetch one gestion as a loose row.
    pub async fn get_gestion(&self, id: &str) -> Result<Row, Error> {
        let resp: Value = self.get_value(&format!("/gestiones/{id}"), &[]).await?;
        match resp {
            Value::Object(row) => Ok(row),
            other => Err(Error::Deserialization {
                message: "gestion detail is not an object".to_owned(),
                body: other.to_string(),
            }),
        }
    }

    /// Create a gestion. The server assigns and returns the id.
    pub async fn create_gestion(&self, payload: &GestionCreate) -> Result<CreatedGestion, Error> {
        self.post_json("/gestiones", payload).await
    }

    /// Change a gestion's state, appending an audit event server-side.
    pub async fn cambiar_estado(&self, id: &str, cambio: &CambioEstado) -> Result<(), Error> {
        let _: Value = self
            .post_json(&format!("/gestiones/{id}/cambiar-estado"), cambio)
            .await?;
        Ok(())
    }

    /// Soft-delete a gestion (marked inactive, not physically removed).
    pub async fn delete_gestion(&self, id: &str) -> Result<(), Error> {
        self.delete(&format!("/gestiones/{id}")).await
    }

    /// Event history for one gestion.
    pub async fn list_eventos(&self, id: &str) -> Result<Vec<Evento>, Error> {
        self.get_json(&format!("/gestiones/{id}/eventos"), &[]).await
    }
}
