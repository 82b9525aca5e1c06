// Listing response normalization
//
// The listing endpoint's envelope is not strictly contracted: depending on
// backend revision it returns a bare array or wraps the rows under `items`,
// `rows`, or `data`. Normalization tries each in a fixed priority order and
// degrades to an empty list -- shape drift must never crash the client.

use serde_json::Value;

use crate::models::Row;

/// Extract the row list from a listing response.
///
/// Priority: bare array, then `items`, `rows`, `data`. An envelope
/// matching none of these yields an empty list, not an error.
/// Non-object entries are dropped.
pub fn normalize_rows(resp: &Value) -> Vec<Row> {
    let arr = if let Some(arr) = resp.as_array() {
        Some(arr)
    } else {
        ["items", "rows", "data"]
            .iter()
            .find_map(|key| resp.get(*key).and_then(Value::as_array))
    };

    arr.map(|rows| {
        rows.iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    })
    .unwrap_or_default()
}

/// Pagination bookkeeping supplied (or not) by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Total matching rows, when the server reports one (`total` with
    /// `count` as fallback). `None` means pagination controls degrade to
    /// "has more if this page was full".
    pub total: Option<u64>,
    pub limit: Option<u32>,
    pub offset: Option<u64>,
}

impl PageInfo {
    pub fn from_envelope(resp: &Value) -> Self {
        Self {
            total: resp
                .get("total")
                .or_else(|| resp.get("count"))
                .and_then(Value::as_u64),
            limit: resp
                .get("limit")
                .and_then(Value::as_u64)
                .and_then(|v| u32::try_from(v).ok()),
            offset: resp.get("offset").and_then(Value::as_u64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_rows() -> Value {
        json!([
            { "id_gestion": "g-1", "estado": "INGRESADO" },
            { "id_gestion": "g-2", "estado": "EN PROCESO" },
        ])
    }

    #[test]
    fn bare_array_and_all_wrapper_keys_yield_the_same_rows() {
        let rows = sample_rows();
        let expected = normalize_rows(&rows);
        assert_eq!(expected.len(), 2);

        for key in ["items", "rows", "data"] {
            let wrapped = json!({ key: rows.clone(), "total": 2 });
            assert_eq!(normalize_rows(&wrapped), expected, "envelope key {key}");
        }
    }

    #[test]
    fn wrapper_keys_are_tried_in_priority_order() {
        let resp = json!({
            "items": [{ "id_gestion": "from-items" }],
            "data": [{ "id_gestion": "from-data" }],
        });
        let rows = normalize_rows(&resp);
        assert_eq!(rows[0]["id_gestion"], "from-items");
    }

    #[test]
    fn unknown_envelope_yields_empty_list() {
        assert!(normalize_rows(&json!({ "records": [1, 2] })).is_empty());
        assert!(normalize_rows(&json!("not a listing")).is_empty());
        assert!(normalize_rows(&Value::Null).is_empty());
    }

    #[test]
    fn page_info_falls_back_from_total_to_count() {
        let info = PageInfo::from_envelope(&json!({ "total": 120, "limit": 50, "offset": 50 }));
        assert_eq!(info.total, Some(120));
        assert_eq!(info.limit, Some(50));
        assert_eq!(info.offset, Some(50));

        let info = PageInfo::from_envelope(&json!({ "count": 7 }));
        assert_eq!(info.total, Some(7));
        assert_eq!(info.limit, None);

        let info = PageInfo::from_envelope(&json!([1, 2, 3]));
        assert_eq!(info, PageInfo::default());
    }
}
