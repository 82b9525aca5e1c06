// ── Per-session catalog cache ──
//
// Reference lookup tables, fetched once after successful auth and read-only
// for the rest of the session. The department -> localities sub-cache is
// populated lazily and never invalidated within the session (stale if the
// server's localities change mid-session -- accepted limitation).

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use tramita_api::ApiClient;
use tramita_api::models::CatalogEntry;

use crate::error::CoreError;

pub struct Catalogs {
    pub estados: Vec<CatalogEntry>,
    pub urgencias: Vec<CatalogEntry>,
    pub ministerios: Vec<CatalogEntry>,
    pub categorias: Vec<CatalogEntry>,
    pub departamentos: Vec<String>,
    /// Keyed by the department's display string, no case or diacritic
    /// normalization: differently-cased inputs are distinct keys.
    localidades: Mutex<HashMap<String, Arc<Vec<String>>>>,
}

impl Catalogs {
    /// Fetch all five reference tables concurrently.
    ///
    /// If any fetch fails, the whole load fails -- a partial catalog set
    /// is not usable. The failure is a data error, never an auth error:
    /// by the time this runs, the identity was already proven valid.
    pub async fn load_all(client: &ApiClient) -> Result<Self, CoreError> {
        let (estados, urgencias, ministerios, categorias, departamentos) = tokio::try_join!(
            client.catalogo_estados(),
            client.catalogo_urgencias(),
            client.catalogo_ministerios(),
            client.catalogo_categorias(),
            client.catalogo_departamentos(),
        )
        .map_err(|e| CoreError::Data {
            message: format!("fall\u{f3} la carga de cat\u{e1}logos: {e}"),
        })?;

        debug!(
            estados = estados.len(),
            ministerios = ministerios.len(),
            categorias = categorias.len(),
            departamentos = departamentos.len(),
            "catalogs loaded"
        );

        Ok(Self {
            estados,
            urgencias,
            ministerios,
            categorias,
            departamentos,
            localidades: Mutex::new(HashMap::new()),
        })
    }

    /// Localities for one department, memoized for the session.
    ///
    /// The first call per department fetches; every later call for the
    /// same display string is served from cache without a network
    /// round-trip. An empty department yields an empty list.
    pub async fn localities_for(
        &self,
        client: &ApiClient,
        departamento: &str,
    ) -> Result<Arc<Vec<String>>, CoreError> {
        if departamento.is_empty() {
            return Ok(Arc::new(Vec::new()));
        }

        let mut cache = self.localidades.lock().await;
        if let Some(hit) = cache.get(departamento) {
            return Ok(Arc::clone(hit));
        }

        let locs = Arc::new(client.catalogo_localidades(departamento).await?);
        cache.insert(departamento.to_owned(), Arc::clone(&locs));
        Ok(locs)
    }

    /// Display name for a ministry/agency id (foreign-key rendering).
    pub fn ministerio_name(&self, id: &str) -> Option<&str> {
        lookup_name(&self.ministerios, id)
    }

    /// Display name for a category id.
    pub fn categoria_name(&self, id: &str) -> Option<&str> {
        lookup_name(&self.categorias, id)
    }
}

fn lookup_name<'a>(entries: &'a [CatalogEntry], id: &str) -> Option<&'a str> {
    entries
        .iter()
        .find(|e| e.id == id)
        .map(|e| e.nombre.as_str())
}
