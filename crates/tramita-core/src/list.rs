// ── Record list controller ──
//
// Filter/pagination state for the gestiones listing. Pure bookkeeping:
// `begin_fetch` hands out the query plus a sequence number, the network
// call happens outside (no lock held across the request), and `apply`
// accepts the response only if it is still the latest issued fetch --
// a slow earlier response must not overwrite a faster later one.

use tramita_api::fields;
use tramita_api::models::{ListQuery, Row};

use tramita_api::envelope::PageInfo;

/// Logical display fields the client-side page search matches against.
/// Candidate keys per field, resolved through the tolerant accessor.
const SEARCH_FIELDS: &[&[&str]] = &[
    &["id_gestion"],
    &["departamento"],
    &["localidad"],
    &["estado"],
    &["urgencia"],
    &["ministerio_agencia_id"],
    &["categoria_general_id"],
    &["detalle"],
    &["nro_expediente"],
];

/// Scoping filters. Changing any of these resets the page cursor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub estado: Option<String>,
    pub ministerio: Option<String>,
    pub categoria: Option<String>,
    pub departamento: Option<String>,
    pub localidad: Option<String>,
    /// Server-side free-text search (`q`). Scopes the server result set,
    /// so it resets the cursor like the other filters. Independent of the
    /// client-side page search below.
    pub remote_query: Option<String>,
}

#[derive(Debug)]
pub struct ListState {
    filters: Filters,
    limit: u32,
    offset: u64,
    /// Known total when the server reports one; `None` degrades "next" to
    /// the "last page was full" heuristic.
    total: Option<u64>,
    /// Client-side substring search over the currently loaded page only.
    /// Does not re-query the server and does not search other pages.
    search: Option<String>,
    rows: Vec<Row>,
    seq_issued: u64,
    seq_applied: u64,
}

impl Default for ListState {
    fn default() -> Self {
        Self {
            filters: Filters::default(),
            limit: 50,
            offset: 0,
            total: None,
            search: None,
            rows: Vec::new(),
            seq_issued: 0,
            seq_applied: 0,
        }
    }
}

impl ListState {
    pub fn new(limit: u32) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    /// Replace the scoping filters. Any change resets the cursor to the
    /// first page and forgets the previous total.
    pub fn set_filters(&mut self, filters: Filters) {
        if self.filters != filters {
            self.filters = filters;
            self.offset = 0;
            self.total = None;
        }
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    /// Change the page size. Resets the cursor like a filter change.
    pub fn set_limit(&mut self, limit: u32) {
        if self.limit != limit {
            self.limit = limit;
            self.offset = 0;
            self.total = None;
        }
    }

    /// Jump the cursor to an absolute offset, preserving filters.
    pub fn set_offset(&mut self, offset: u64) {
        self.offset = offset;
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn total(&self) -> Option<u64> {
        self.total
    }

    // ── Page cursor ──────────────────────────────────────────────────

    pub fn has_prev(&self) -> bool {
        self.offset > 0
    }

    /// "Next" is available while `offset + limit < total` when the total
    /// is known; otherwise while the last fetched page came back full.
    pub fn has_next(&self) -> bool {
        match self.total {
            Some(total) => self.offset + u64::from(self.limit) < total,
            None => self.seq_applied > 0 && self.rows.len() as u64 == u64::from(self.limit),
        }
    }

    /// Advance the cursor, preserving filters. No-op on the last page.
    pub fn next_page(&mut self) {
        if self.has_next() {
            self.offset += u64::from(self.limit);
        }
    }

    /// Move the cursor back, preserving filters. No-op at offset 0.
    pub fn prev_page(&mut self) {
        self.offset = self.offset.saturating_sub(u64::from(self.limit));
    }

    // ── Fetch bookkeeping ────────────────────────────────────────────

    /// Start a fetch: returns the query for the current scope/cursor and
    /// the sequence number identifying this fetch.
    pub fn begin_fetch(&mut self) -> (ListQuery, u64) {
        self.seq_issued += 1;
        let query = ListQuery {
            estado: self.filters.estado.clone(),
            ministerio: self.filters.ministerio.clone(),
            categoria: self.filters.categoria.clone(),
            departamento: self.filters.departamento.clone(),
            localidad: self.filters.localidad.clone(),
            q: self.filters.remote_query.clone(),
            limit: self.limit,
            offset: self.offset,
        };
        (query, self.seq_issued)
    }

    /// Apply a completed fetch. Returns `false` (and changes nothing) if a
    /// newer fetch was issued meanwhile -- the stale response is discarded
    /// instead of rendered.
    pub fn apply(&mut self, seq: u64, rows: Vec<Row>, page: PageInfo) -> bool {
        if seq != self.seq_issued {
            tracing::debug!(seq, latest = self.seq_issued, "stale list fetch discarded");
            return false;
        }
        self.total = page.total;
        self.rows = rows;
        self.seq_applied = seq;
        true
    }

    // ── Client-side page search ──────────────────────────────────────

    /// Set or clear the in-page search query. Page-local by design: it
    /// filters only the loaded rows and never triggers a server query.
    pub fn set_search(&mut self, query: Option<String>) {
        self.search = query.filter(|q| !q.is_empty());
    }

    /// The loaded page, filtered by the in-page search when one is set.
    /// Clearing the search restores the full loaded page.
    pub fn visible_rows(&self) -> Vec<Row> {
        match self.search.as_deref() {
            Some(q) => search_rows(&self.rows, q),
            None => self.rows.clone(),
        }
    }

    /// The loaded page, unfiltered.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Forget loaded rows and bookkeeping (sign-out).
    pub fn reset(&mut self) {
        *self = Self::new(self.limit);
    }
}

/// Case-insensitive substring match across the fixed display-field set.
pub fn search_rows(rows: &[Row], query: &str) -> Vec<Row> {
    let needle = query.to_lowercase();
    rows.iter()
        .filter(|row| {
            SEARCH_FIELDS.iter().any(|candidates| {
                fields::resolve_display(row, candidates)
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .cloned()
        .collect()
}
