// API request/response types
//
// Response models use `#[serde(default)]` liberally because the backend is
// not strictly contracted about field presence; the listing payload is kept
// as a loose map (`Row`) and read through `fields::resolve` instead of a
// static schema.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One gestion as returned by the listing/detail endpoints: a loosely
/// shaped key-value bag. Field naming is not guaranteed to be stable
/// across deployments -- read it through [`crate::fields::resolve`].
pub type Row = serde_json::Map<String, Value>;

// ── Identity ─────────────────────────────────────────────────────────

/// Authenticated identity from `GET /me`.
#[derive(Debug, Clone, Deserialize)]
pub struct Identity {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub rol: Option<String>,
}

impl Identity {
    /// Display label: the non-empty parts joined with a separator,
    /// or "Autenticado" when the backend returned none of them.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [&self.nombre, &self.email, &self.rol]
            .into_iter()
            .filter_map(|p| p.as_deref())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.is_empty() {
            "Autenticado".to_owned()
        } else {
            parts.join(" \u{b7} ")
        }
    }
}

// ── Catalogs ─────────────────────────────────────────────────────────

/// One reference-table entry. Estados and urgencias are name-only server
/// side, so `id` defaults to empty for those catalogs.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub nombre: String,
}

// ── Listing ──────────────────────────────────────────────────────────

/// Query for `GET /gestiones`. Only non-empty scoping filters are
/// serialized; `limit`/`offset` always are.
#[derive(Debug, Clone)]
pub struct ListQuery {
    pub estado: Option<String>,
    pub ministerio: Option<String>,
    pub categoria: Option<String>,
    pub departamento: Option<String>,
    pub localidad: Option<String>,
    /// Server-side free-text search (independent of the client-side
    /// page search in `tramita-core`).
    pub q: Option<String>,
    pub limit: u32,
    pub offset: u64,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            estado: None,
            ministerio: None,
            categoria: None,
            departamento: None,
            localidad: None,
            q: None,
            limit: 50,
            offset: 0,
        }
    }
}

impl ListQuery {
    /// Flatten into query-string pairs.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut out = Vec::new();
        let scoped = [
            ("estado", &self.estado),
            ("ministerio", &self.ministerio),
            ("categoria", &self.categoria),
            ("departamento", &self.departamento),
            ("localidad", &self.localidad),
            ("q", &self.q),
        ];
        for (name, value) in scoped {
            match value.as_deref() {
                Some(v) if !v.is_empty() => out.push((name, v.to_owned())),
                _ => {}
            }
        }
        out.push(("limit", self.limit.to_string()));
        out.push(("offset", self.offset.to_string()));
        out
    }
}

// ── Mutations ────────────────────────────────────────────────────────

/// Payload for `POST /gestiones`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GestionCreate {
    pub ministerio_agencia_id: String,
    pub categoria_general_id: String,
    pub urgencia: String,
    pub detalle: String,
    pub observaciones: Option<String>,
    pub departamento: String,
    pub localidad: String,
    pub direccion: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nro_expediente: Option<String>,
    /// Sent as a string to keep exact decimal representation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo_estimado: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costo_moneda: Option<String>,
}

/// Response from `POST /gestiones`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedGestion {
    pub id_gestion: String,
}

/// Payload for `POST /gestiones/{id}/cambiar-estado`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CambioEstado {
    pub nuevo_estado: String,
    pub comentario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub derivado_a: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acciones_implementadas: Option<String>,
}

// ── Events ───────────────────────────────────────────────────────────

/// Immutable audit entry from `GET /gestiones/{id}/eventos`.
#[derive(Debug, Clone, Deserialize)]
pub struct Evento {
    #[serde(default)]
    pub id_evento: Option<String>,
    #[serde(default)]
    pub fecha_evento: Option<DateTime<Utc>>,
    #[serde(default)]
    pub usuario: Option<String>,
    #[serde(default)]
    pub rol_usuario: Option<String>,
    #[serde(default)]
    pub tipo_evento: Option<String>,
    #[serde(default)]
    pub estado_anterior: Option<String>,
    #[serde(default)]
    pub estado_nuevo: Option<String>,
    #[serde(default)]
    pub comentario: Option<String>,
    #[serde(default)]
    pub metadata_json: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}
